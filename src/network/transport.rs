//! Transport boundary
//!
//! The client only needs an ordered, blocking byte stream that can be
//! closed and asked for pending bytes without blocking. Connection policy (TLS, retry, pooling) lives outside this crate.

use std::io::{self, ErrorKind, Write};
use std::net::{Shutdown, TcpStream};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::protocol::Pending;

/// Bidirectional byte stream used by [`Client`](super::Client)
pub trait Transport: Pending + Write {
    /// Close the stream; later reads and writes fail
    fn close(&mut self) -> io::Result<()>;
}

impl Pending for TcpStream {
    fn has_pending(&mut self) -> io::Result<bool> {
        let mut byte = [0u8; 1];

        self.set_nonblocking(true)?;
        let peeked = self.peek(&mut byte);
        self.set_nonblocking(false)?;

        match peeked {
            Ok(n) => Ok(n > 0),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Transport for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

/// Open a TCP stream as described by `config`
pub fn connect_tcp(config: &ClientConfig) -> Result<TcpStream> {
    let addr = config.socket_addr()?;

    let stream = match config.connect_timeout() {
        Some(timeout) => TcpStream::connect_timeout(&addr, timeout)?,
        None => TcpStream::connect(addr)?,
    };
    stream.set_nodelay(config.nodelay)?;

    tracing::debug!("Connected to {}", addr);
    Ok(stream)
}
