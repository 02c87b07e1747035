//! Response definitions
//!
//! The closed set of reply shapes a command can produce.

use crate::job::{InspectedJob, JobResult, LeasedJob};

/// Response grammars, selected by the command that was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// `+OK`
    Ack,

    /// `+OK 1` followed by one job result record
    JobResult,

    /// `+OK 1` followed by one leased job record
    LeasedJob,

    /// `+OK <n>` followed by `n` inspected job records
    InspectedJobs,
}

/// A decoded successful response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Result(JobResult),
    Leased(LeasedJob),
    Inspected(Vec<InspectedJob>),
}

impl Reply {
    pub fn shape(&self) -> ReplyShape {
        match self {
            Reply::Ok => ReplyShape::Ack,
            Reply::Result(_) => ReplyShape::JobResult,
            Reply::Leased(_) => ReplyShape::LeasedJob,
            Reply::Inspected(_) => ReplyShape::InspectedJobs,
        }
    }
}
