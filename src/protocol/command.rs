//! Command definitions
//!
//! Represents commands sent to the server.

use crate::job::{BackgroundJob, ForegroundJob, ScheduledJob};
use super::ReplyShape;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Add,
    Run,
    Schedule,
    Result,
    Lease,
    Complete,
    Fail,
    Delete,
    InspectJobs,
}

impl CommandType {
    /// Leading keyword(s) on the wire
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandType::Add => "add",
            CommandType::Run => "run",
            CommandType::Schedule => "schedule",
            CommandType::Result => "result",
            CommandType::Lease => "lease",
            CommandType::Complete => "complete",
            CommandType::Fail => "fail",
            CommandType::Delete => "delete",
            CommandType::InspectJobs => "inspect jobs",
        }
    }

    /// Shape of the response the server sends back for this command
    pub fn reply_shape(&self) -> ReplyShape {
        match self {
            CommandType::Add
            | CommandType::Schedule
            | CommandType::Complete
            | CommandType::Fail
            | CommandType::Delete => ReplyShape::Ack,
            CommandType::Run | CommandType::Result => ReplyShape::JobResult,
            CommandType::Lease => ReplyShape::LeasedJob,
            CommandType::InspectJobs => ReplyShape::InspectedJobs,
        }
    }
}

/// A command ready to be encoded, borrowing its parameters
#[derive(Debug, Clone, Copy)]
pub enum Command<'a> {
    /// Submit a background job
    Add(&'a BackgroundJob),

    /// Submit a foreground job and wait for its result
    Run(&'a ForegroundJob),

    /// Schedule a job for a future UTC time
    Schedule(&'a ScheduledJob),

    /// Fetch a job result, waiting up to `timeout` ms
    Result { id: &'a str, timeout: u64 },

    /// Lease a job from any of `names`, waiting up to `timeout` ms
    Lease { names: &'a [&'a str], timeout: u64 },

    /// Mark a job successfully complete
    Complete { id: &'a str, result: &'a [u8] },

    /// Mark a job as failed
    Fail { id: &'a str, result: &'a [u8] },

    /// Delete a job
    Delete { id: &'a str },

    /// Inspect jobs by name
    InspectJobs {
        name: &'a str,
        cursor_offset: u64,
        limit: u64,
    },
}

impl Command<'_> {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Add(_) => CommandType::Add,
            Command::Run(_) => CommandType::Run,
            Command::Schedule(_) => CommandType::Schedule,
            Command::Result { .. } => CommandType::Result,
            Command::Lease { .. } => CommandType::Lease,
            Command::Complete { .. } => CommandType::Complete,
            Command::Fail { .. } => CommandType::Fail,
            Command::Delete { .. } => CommandType::Delete,
            Command::InspectJobs { .. } => CommandType::InspectJobs,
        }
    }

    pub fn reply_shape(&self) -> ReplyShape {
        self.command_type().reply_shape()
    }
}
