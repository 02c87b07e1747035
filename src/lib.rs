//! # workq-client
//!
//! A blocking client for the Workq job server:
//! - Binary-safe codec for the line-oriented Workq protocol
//! - Strict response framing (exact terminators, no trailing bytes)
//! - Typed results for run/result/lease/inspect
//! - Transport, server and protocol errors kept distinct
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                              │
//! │           (one command in flight per connection)            │
//! └──────────────┬──────────────────────────────▲───────────────┘
//!                │ Command                      │ Reply / WorkqError
//!                ▼                              │
//!   ┌─────────────────────┐        ┌────────────┴────────┐
//!   │   Command Encoder   │        │  Response Decoder   │
//!   │  (lines + blocks)   │        │ (pull-parser, CRLF) │
//!   └──────────┬──────────┘        └────────────▲────────┘
//!              │                                │
//!              ▼                                │
//!   ┌─────────────────────────────────────────────────────┐
//!   │                Transport (TcpStream)                │
//!   └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use workq_client::{BackgroundJob, Client};
//!
//! let mut client = Client::connect("127.0.0.1:9922")?;
//! client.add(&BackgroundJob {
//!     id: "6ba7b810-9dad-11d1-80b4-00c04fd430c4".to_string(),
//!     name: "ping".to_string(),
//!     ttr: 60,
//!     ttl: 60_000,
//!     payload: b"hello".to_vec(),
//!     ..Default::default()
//! })?;
//!
//! let job = client.lease(&["ping"], 1000)?;
//! client.complete(&job.id, b"pong")?;
//! client.close()?;
//! # Ok::<(), workq_client::WorkqError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod job;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ResponseError, Result, WorkqError};
pub use config::ClientConfig;
pub use job::{
    format_time, BackgroundJob, ForegroundJob, InspectedJob, JobResult, LeasedJob, ScheduledJob,
    TIME_FORMAT,
};
pub use network::{Client, Transport};
pub use protocol::Pending;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
