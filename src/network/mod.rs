//! Network Module
//!
//! Client connection handling.
//!
//! ## Architecture
//! - One blocking transport per client
//! - One request in flight: write the command, then read its full reply
//! - No reconnect, retry or pipelining

mod client;
mod transport;

pub use client::Client;
pub use transport::{connect_tcp, Transport};
