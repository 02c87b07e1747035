//! Response decoder
//!
//! Pull-parser over the client's buffered stream. Lines and blocks are
//! validated as they are read; nothing is buffered in full first.
//!
//! ## Response Grammars
//! ```text
//! +OK\r\n                                  ack
//! +OK <reply-count>\r\n                    ack with reply count
//! -<CODE>[ <TEXT>]\r\n                     server error
//!
//! <id> <0|1> <size>\r\n<block>\r\n         job result
//! <id> <name> [<ttr>] <size>\r\n<block>\r\n leased job
//! <id> <key-count>\r\n                     inspected job, followed by
//! <key> <value>\r\n                        ... key-count entries
//! ```
//!
//! Failures are fail-fast. After any error the read position is left where
//! parsing stopped, so the connection cannot be reused.

use std::io::{BufRead, BufReader, ErrorKind, Read};

use crate::error::{ResponseError, Result, WorkqError};
use crate::job::{InspectedJob, JobResult, LeasedJob};
use super::validate::{
    id_from_str, line_str, name_from_str, parse_int, parse_time, parse_uint,
};
use super::{Pending, Reply, ReplyShape, CRLF, MAX_DATA_BLOCK, MAX_LINE_LEN};

/// Plain acknowledgement line
const OK: &[u8] = b"+OK";

/// Prefix of an acknowledgement carrying a reply count
const OK_COUNT_PREFIX: &[u8] = b"+OK ";

/// Sign byte of an error line
const ERROR_SIGN: u8 = b'-';

/// Marker in front of the payload block that follows `payload-size`
const PAYLOAD_MARKER: &[u8] = b"payload ";

/// Reads one response from the stream
pub struct ResponseReader<'a, R> {
    rdr: &'a mut BufReader<R>,
}

impl<'a, R: Pending> ResponseReader<'a, R> {
    pub fn new(rdr: &'a mut BufReader<R>) -> Self {
        Self { rdr }
    }

    // =========================================================================
    // Replies
    // =========================================================================

    /// Decode the reply grammar selected by `shape`
    pub fn read_reply(&mut self, shape: ReplyShape) -> Result<Reply> {
        match shape {
            ReplyShape::Ack => self.read_ack().map(|_| Reply::Ok),
            ReplyShape::JobResult => self.read_result_reply().map(Reply::Result),
            ReplyShape::LeasedJob => self.read_lease_reply().map(Reply::Leased),
            ReplyShape::InspectedJobs => self.read_inspect_reply().map(Reply::Inspected),
        }
    }

    /// `+OK` followed by exactly one job result record
    pub fn read_result_reply(&mut self) -> Result<JobResult> {
        self.read_single_count()?;
        let result = self.read_job_result()?;
        self.ensure_drained()?;
        Ok(result)
    }

    /// `+OK` followed by exactly one leased job record
    pub fn read_lease_reply(&mut self) -> Result<LeasedJob> {
        self.read_single_count()?;
        let job = self.read_leased_job()?;
        self.ensure_drained()?;
        Ok(job)
    }

    /// `+OK <n>` followed by `n` inspected job records
    pub fn read_inspect_reply(&mut self) -> Result<Vec<InspectedJob>> {
        let count = self.read_count()?;
        let jobs = self.read_inspected_jobs(count)?;
        self.ensure_drained()?;
        Ok(jobs)
    }

    // =========================================================================
    // Status Lines
    // =========================================================================

    /// Parse a `+OK` response
    pub fn read_ack(&mut self) -> Result<()> {
        let line = self.read_status_line()?;
        if line == OK {
            return Ok(());
        }
        Err(status_error(&line))
    }

    /// Parse a `+OK <reply-count>` response
    pub fn read_count(&mut self) -> Result<usize> {
        let line = self.read_status_line()?;
        match line.strip_prefix(OK_COUNT_PREFIX) {
            Some(count) => parse_uint(line_str(count)?, "reply count"),
            None => Err(status_error(&line)),
        }
    }

    fn read_single_count(&mut self) -> Result<()> {
        match self.read_count()? {
            1 => Ok(()),
            n => Err(WorkqError::malformed(format!(
                "expected reply count 1, got {}",
                n
            ))),
        }
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Read a job result: `<id> <0|1> <size>` then the result block
    pub fn read_job_result(&mut self) -> Result<JobResult> {
        let line = self.read_line()?;
        let fields: Vec<&str> = line_str(&line)?.split(' ').collect();
        let [id, success, size] = fields[..] else {
            return Err(WorkqError::malformed("job result: expected 3 fields"));
        };

        id_from_str(id)?;
        let success = match success {
            "0" => false,
            "1" => true,
            _ => {
                return Err(WorkqError::malformed(format!(
                    "job result: invalid success flag {:?}",
                    success
                )))
            }
        };
        let size = parse_uint(size, "result size")?;

        let result = self.read_block(size)?;
        Ok(JobResult { success, result })
    }

    /// Read a leased job: `<id> <name> [<ttr>] <size>` then the payload block
    pub fn read_leased_job(&mut self) -> Result<LeasedJob> {
        let line = self.read_line()?;
        let fields: Vec<&str> = line_str(&line)?.split(' ').collect();
        let (id, name, ttr, size) = match fields[..] {
            [id, name, size] => (id, name, None, size),
            [id, name, ttr, size] => (id, name, Some(parse_uint(ttr, "ttr")?), size),
            _ => return Err(WorkqError::malformed("leased job: expected 3 or 4 fields")),
        };

        let id = id_from_str(id)?;
        let name = name_from_str(name)?;
        let size = parse_uint(size, "payload size")?;

        let payload = self.read_block(size)?;
        Ok(LeasedJob {
            id,
            name,
            ttr,
            payload,
        })
    }

    /// Read `count` inspected job records
    pub fn read_inspected_jobs(&mut self, count: usize) -> Result<Vec<InspectedJob>> {
        let mut jobs = Vec::new();
        for _ in 0..count {
            jobs.push(self.read_inspected_job()?);
        }
        Ok(jobs)
    }

    /// Read one inspected job: `<id> <key-count>` then its key/value entries
    ///
    /// Entries are uniform `<key> <value>` lines with one exception:
    /// `payload-size <n>` is immediately followed by `payload <n bytes>\r\n`.
    /// The pair is consumed together and counts as a single key toward
    /// `key-count`, since the payload line can contain CR/LF and is never
    /// parsed as a line.
    pub fn read_inspected_job(&mut self) -> Result<InspectedJob> {
        let line = self.read_line()?;
        let fields: Vec<&str> = line_str(&line)?.split(' ').collect();
        let [id, key_count] = fields[..] else {
            return Err(WorkqError::malformed("inspected job: expected 2 fields"));
        };

        let mut job = InspectedJob::default();
        job.job.id = id_from_str(id)?;
        let mut remaining: usize = parse_uint(key_count, "key count")?;

        while remaining > 0 {
            let line = self.read_line()?;
            let (key, value) = split_entry(&line)?;

            match key {
                InspectKey::PayloadSize => {
                    let size = parse_uint(value, "payload size")?;
                    job.job.payload = self.read_payload_entry(size)?;
                }
                InspectKey::Payload => return Err(WorkqError::PayloadMustFollowSize),
                key => key.apply(value, &mut job)?,
            }
            remaining -= 1;
        }

        Ok(job)
    }

    /// Marker and block of the `payload` entry paired with `payload-size`
    fn read_payload_entry(&mut self, size: usize) -> Result<Vec<u8>> {
        check_block_size(size)?;

        let mut marker = [0u8; PAYLOAD_MARKER.len()];
        match self.rdr.read_exact(&mut marker) {
            Ok(()) if marker == PAYLOAD_MARKER => {}
            Ok(()) => return Err(WorkqError::PayloadMustFollowSize),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(WorkqError::PayloadMustFollowSize)
            }
            Err(e) => return Err(e.into()),
        }

        self.read_block(size)
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Read a CRLF terminated line, without the terminator
    ///
    /// End of stream here means the record was cut short.
    pub fn read_line(&mut self) -> Result<Vec<u8>> {
        self.next_line()?
            .ok_or_else(|| WorkqError::malformed("truncated record"))
    }

    /// Read the first line of a response
    ///
    /// End of stream here means the server closed the connection.
    fn read_status_line(&mut self) -> Result<Vec<u8>> {
        self.next_line()?
            .ok_or_else(|| WorkqError::Net("unexpected EOF".to_string()))
    }

    fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        (&mut *self.rdr)
            .take(MAX_LINE_LEN as u64)
            .read_until(b'\n', &mut line)?;
        if line.last() != Some(&b'\n') {
            if line.len() == MAX_LINE_LEN {
                return Err(WorkqError::malformed(format!(
                    "line exceeds {} bytes",
                    MAX_LINE_LEN
                )));
            }
            return Ok(None);
        }

        if !line.ends_with(CRLF) {
            return Err(WorkqError::malformed("line not terminated by CRLF"));
        }
        line.truncate(line.len() - CRLF.len());
        Ok(Some(line))
    }

    /// Read a `size` byte block followed by exactly CRLF
    ///
    /// The block is taken verbatim; a size over [`MAX_DATA_BLOCK`] is
    /// rejected before anything is read.
    pub fn read_block(&mut self, size: usize) -> Result<Vec<u8>> {
        check_block_size(size)?;

        let mut block = vec![0u8; size];
        self.read_exact(&mut block)?;

        let mut term = [0u8; 2];
        self.read_exact(&mut term)?;
        if term != CRLF {
            // Size does not match end of block; trailing garbage is not allowed
            return Err(WorkqError::malformed("block not terminated by CRLF"));
        }

        Ok(block)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.rdr.read_exact(buf) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(WorkqError::malformed("incomplete block"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fail if any byte beyond the declared records is readable
    ///
    /// Checks the read buffer first, then asks the source without blocking.
    pub fn ensure_drained(&mut self) -> Result<()> {
        let trailing = self.rdr.buffer().len();
        if trailing > 0 {
            return Err(WorkqError::malformed(format!(
                "{} unexpected trailing bytes",
                trailing
            )));
        }
        if self.rdr.get_mut().has_pending()? {
            return Err(WorkqError::malformed("unexpected trailing bytes"));
        }
        Ok(())
    }
}

fn check_block_size(size: usize) -> Result<()> {
    if size > MAX_DATA_BLOCK {
        return Err(WorkqError::malformed(format!(
            "block size {} exceeds {}",
            size, MAX_DATA_BLOCK
        )));
    }
    Ok(())
}

/// Classify a status line that is not the expected acknowledgement
fn status_error(line: &[u8]) -> WorkqError {
    if line.first() != Some(&ERROR_SIGN) {
        return WorkqError::malformed("unexpected status line");
    }
    match error_from_line(line) {
        Ok(err) => err.into(),
        Err(err) => err,
    }
}

/// Parse an error from `-CODE[ TEXT]`
fn error_from_line(line: &[u8]) -> Result<ResponseError> {
    let line = line_str(&line[1..])?;
    let (code, text) = match line.split_once(' ') {
        Some((_, "")) => return Err(WorkqError::malformed("error line with empty text")),
        Some((code, text)) => (code, text),
        None => (line, ""),
    };

    if code.is_empty() {
        return Err(WorkqError::malformed("error line without code"));
    }

    Ok(ResponseError::new(code, text))
}

// =============================================================================
// Inspected Job Keys
// =============================================================================

/// Keys of an inspected job record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InspectKey {
    Name,
    Ttr,
    Ttl,
    PayloadSize,
    Payload,
    MaxAttempts,
    Attempts,
    MaxFails,
    Fails,
    Priority,
    State,
    Created,
}

impl InspectKey {
    fn parse(key: &[u8]) -> Result<Self> {
        let key = match key {
            b"name" => InspectKey::Name,
            b"ttr" => InspectKey::Ttr,
            b"ttl" => InspectKey::Ttl,
            b"payload-size" => InspectKey::PayloadSize,
            b"payload" => InspectKey::Payload,
            b"max-attempts" => InspectKey::MaxAttempts,
            b"attempts" => InspectKey::Attempts,
            b"max-fails" => InspectKey::MaxFails,
            b"fails" => InspectKey::Fails,
            b"priority" => InspectKey::Priority,
            b"state" => InspectKey::State,
            b"created" => InspectKey::Created,
            _ => {
                return Err(WorkqError::malformed(format!(
                    "unknown inspect key {:?}",
                    String::from_utf8_lossy(key)
                )))
            }
        };
        Ok(key)
    }

    /// Store a plain `<key> <value>` entry on the job
    fn apply(self, value: &str, job: &mut InspectedJob) -> Result<()> {
        match self {
            InspectKey::Name => job.job.name = name_from_str(value)?,
            InspectKey::Ttr => job.job.ttr = parse_uint(value, "ttr")?,
            InspectKey::Ttl => job.job.ttl = parse_uint(value, "ttl")?,
            InspectKey::MaxAttempts => job.job.max_attempts = parse_uint(value, "max-attempts")?,
            InspectKey::Attempts => job.attempts = parse_uint(value, "attempts")?,
            InspectKey::MaxFails => job.job.max_fails = parse_uint(value, "max-fails")?,
            InspectKey::Fails => job.fails = parse_uint(value, "fails")?,
            InspectKey::Priority => job.job.priority = parse_int(value, "priority")?,
            InspectKey::State => job.state = parse_uint(value, "state")?,
            InspectKey::Created => job.created = Some(parse_time(value)?),
            InspectKey::PayloadSize | InspectKey::Payload => {
                return Err(WorkqError::malformed("payload entries carry a block"))
            }
        }
        Ok(())
    }
}

/// Split a `<key> <value>` entry
///
/// The key is classified before the value is looked at, so a stray
/// `payload` entry is reported as an ordering error whatever it carries.
fn split_entry(line: &[u8]) -> Result<(InspectKey, &str)> {
    let (key, value) = match line.iter().position(|&b| b == b' ') {
        Some(sep) => (&line[..sep], Some(&line[sep + 1..])),
        None => (line, None),
    };

    let key = InspectKey::parse(key)?;
    if key == InspectKey::Payload {
        return Ok((key, ""));
    }

    let value = line_str(value.unwrap_or_default())?;
    if value.is_empty() || value.contains(' ') {
        return Err(WorkqError::malformed("inspect entry: expected 2 fields"));
    }
    Ok((key, value))
}
