//! Client
//!
//! A single connection to a Workq server. Every command writes its frame,
//! then reads the complete response before returning, so at most one request
//! is ever in flight.

use std::io::BufReader;
use std::net::TcpStream;

use crate::config::ClientConfig;
use crate::error::{Result, WorkqError};
use crate::job::{BackgroundJob, ForegroundJob, InspectedJob, JobResult, LeasedJob, ScheduledJob};
use crate::protocol::{write_command, Command, Reply, ResponseReader};
use super::transport::{connect_tcp, Transport};

/// Client for one Workq connection
pub struct Client<T: Transport> {
    /// Buffered read side; writes go straight to the inner transport
    reader: BufReader<T>,

    /// Set once `close` succeeded
    closed: bool,
}

impl Client<TcpStream> {
    /// Connect to a Workq server over TCP
    pub fn connect(addr: impl Into<String>) -> Result<Self> {
        Self::connect_with(&ClientConfig::builder().addr(addr).build())
    }

    /// Connect using a full client configuration
    pub fn connect_with(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(connect_tcp(config)?))
    }
}

impl<T: Transport> Client<T> {
    /// Wrap an already connected transport
    pub fn new(transport: T) -> Self {
        Self {
            reader: BufReader::new(transport),
            closed: false,
        }
    }

    /// "add": submit a background job
    pub fn add(&mut self, job: &BackgroundJob) -> Result<()> {
        self.send(&Command::Add(job))?;
        self.finish(|rdr| rdr.read_ack())
    }

    /// "run": submit a foreground job and wait for its result
    pub fn run(&mut self, job: &ForegroundJob) -> Result<JobResult> {
        self.send(&Command::Run(job))?;
        self.finish(|rdr| rdr.read_result_reply())
    }

    /// "schedule": submit a job to run at a future UTC time
    pub fn schedule(&mut self, job: &ScheduledJob) -> Result<()> {
        self.send(&Command::Schedule(job))?;
        self.finish(|rdr| rdr.read_ack())
    }

    /// "result": fetch a job result, waiting up to `timeout` ms
    pub fn result(&mut self, id: &str, timeout: u64) -> Result<JobResult> {
        self.send(&Command::Result { id, timeout })?;
        self.finish(|rdr| rdr.read_result_reply())
    }

    /// "lease": lease a job from any of `names`, waiting up to `timeout` ms
    pub fn lease(&mut self, names: &[&str], timeout: u64) -> Result<LeasedJob> {
        self.send(&Command::Lease { names, timeout })?;
        self.finish(|rdr| rdr.read_lease_reply())
    }

    /// "complete": mark a leased job successful with its result
    pub fn complete(&mut self, id: &str, result: &[u8]) -> Result<()> {
        self.send(&Command::Complete { id, result })?;
        self.finish(|rdr| rdr.read_ack())
    }

    /// "fail": mark a leased job failed with its result
    pub fn fail(&mut self, id: &str, result: &[u8]) -> Result<()> {
        self.send(&Command::Fail { id, result })?;
        self.finish(|rdr| rdr.read_ack())
    }

    /// "delete": delete a job
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.send(&Command::Delete { id })?;
        self.finish(|rdr| rdr.read_ack())
    }

    /// "inspect jobs": page through jobs queued under `name`
    pub fn inspect_jobs(
        &mut self,
        name: &str,
        cursor_offset: u64,
        limit: u64,
    ) -> Result<Vec<InspectedJob>> {
        self.send(&Command::InspectJobs {
            name,
            cursor_offset,
            limit,
        })?;
        self.finish(|rdr| rdr.read_inspect_reply())
    }

    /// Send any command and decode the reply its type calls for
    pub fn execute(&mut self, command: &Command) -> Result<Reply> {
        self.send(command)?;
        let shape = command.reply_shape();
        self.finish(|rdr| rdr.read_reply(shape))
    }

    /// Close the connection
    ///
    /// Closing twice is an error.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(WorkqError::Net("connection already closed".to_string()));
        }
        self.reader.get_mut().close()?;
        self.closed = true;
        tracing::debug!("Connection closed");
        Ok(())
    }

    /// Access the underlying transport
    pub fn get_ref(&self) -> &T {
        self.reader.get_ref()
    }

    fn send(&mut self, command: &Command) -> Result<()> {
        tracing::debug!("Sending {} command", command.command_type().keyword());
        write_command(self.reader.get_mut(), command)
    }

    fn finish<V>(
        &mut self,
        decode: impl FnOnce(&mut ResponseReader<'_, T>) -> Result<V>,
    ) -> Result<V> {
        let result = decode(&mut ResponseReader::new(&mut self.reader));

        match &result {
            Ok(_) => tracing::trace!("Response decoded"),
            Err(WorkqError::Response(e)) => tracing::debug!("Server error: {}", e),
            Err(e) if e.is_malformed() => {
                tracing::warn!("Malformed response, connection is no longer usable: {}", e)
            }
            Err(e) => tracing::warn!("Transport failure: {}", e),
        }

        result
    }
}
