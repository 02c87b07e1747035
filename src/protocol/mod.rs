//! Protocol Module
//!
//! Defines the Workq wire protocol: a line-oriented text protocol with
//! length-prefixed binary blocks.
//!
//! ## Request Format
//! ```text
//! ┌──────────────────────────────────────┬──────┐
//! │ keyword fields... [-flag=value ...]  │ \r\n │
//! ├──────────────────────────────────────┼──────┤
//! │ block (declared length, raw bytes)   │ \r\n │   only for data commands
//! └──────────────────────────────────────┴──────┘
//! ```
//!
//! ### Commands
//! - add:          id name ttr ttl size [flags] + payload
//! - run:          id name ttr timeout size [-priority] + payload
//! - schedule:     id name ttr ttl time size [flags] + payload
//! - result:       id timeout
//! - lease:        name... timeout
//! - complete:     id size + result
//! - fail:         id size + result
//! - delete:       id
//! - inspect jobs: name cursor-offset limit
//!
//! ### Responses
//! - `+OK`              acknowledgement
//! - `+OK <n>`          acknowledgement followed by `n` records
//! - `-CODE [TEXT]`     server error

mod command;
mod response;
mod codec;
mod decode;
mod pending;
mod validate;

pub use command::{Command, CommandType};
pub use response::{Reply, ReplyShape};
pub use codec::{encode_command, write_command};
pub use decode::ResponseReader;
pub use pending::Pending;

/// Line terminator
pub const CRLF: &[u8] = b"\r\n";

/// Max data block that can be read within a response, 1 MiB
pub const MAX_DATA_BLOCK: usize = 1024 * 1024;

/// Longest response line accepted, terminator included
pub const MAX_LINE_LEN: usize = 1024;
