//! Job definitions
//!
//! Plain value records for job submissions and the jobs/results the server
//! hands back. Optional numeric fields use zero for "not set"; the encoder
//! leaves the matching flag off the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time format for scheduled times, e.g. `2016-01-02T15:04:05Z`
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render a UTC time the way the `schedule` command expects it
pub fn format_time(time: DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Background job, submitted with `add`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundJob {
    pub id: String,
    pub name: String,
    /// Time-to-run in seconds
    pub ttr: u32,
    /// Time-to-live in seconds
    pub ttl: u64,
    pub payload: Vec<u8>,
    pub priority: i32,
    /// Absolute max number of attempts
    pub max_attempts: u8,
    /// Absolute max number of failures
    pub max_fails: u8,
}

/// Foreground job, submitted with `run`; the caller blocks for its result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForegroundJob {
    pub id: String,
    pub name: String,
    pub ttr: u32,
    /// Milliseconds to wait for job completion
    pub timeout: u64,
    pub payload: Vec<u8>,
    pub priority: i32,
}

/// Job deferred until a UTC time, submitted with `schedule`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub id: String,
    pub name: String,
    pub ttr: u32,
    pub ttl: u64,
    /// UTC time in [`TIME_FORMAT`]
    pub time: String,
    pub payload: Vec<u8>,
    pub priority: i32,
    pub max_attempts: u8,
    pub max_fails: u8,
}

/// Job handed out by `lease`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeasedJob {
    pub id: String,
    pub name: String,
    /// Only present when the server includes it in the lease record
    pub ttr: Option<u32>,
    pub payload: Vec<u8>,
}

/// Outcome of a job, returned by `run` and `result`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub success: bool,
    pub result: Vec<u8>,
}

/// Read-only snapshot returned by `inspect jobs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectedJob {
    #[serde(flatten)]
    pub job: BackgroundJob,
    /// Attempts made so far
    pub attempts: u8,
    /// Failures so far
    pub fails: u8,
    /// Server-side state code
    pub state: u8,
    pub created: Option<DateTime<Utc>>,
}
