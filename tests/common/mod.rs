//! Shared test transports

#![allow(dead_code)]

use std::io::{self, Chain, Cursor, Read, Write};

use workq_client::{Pending, Transport};

pub const ID: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c4";

/// In-memory transport: reads a canned response, records writes
pub struct MockTransport {
    rdr: Chain<Cursor<Vec<u8>>, Cursor<Vec<u8>>>,
    pub written: Vec<u8>,
    pub closed: bool,
}

impl MockTransport {
    pub fn new(response: impl Into<Vec<u8>>) -> Self {
        Self::split(response, Vec::new())
    }

    /// `late` is only handed out by a read after `response` is exhausted
    pub fn split(response: impl Into<Vec<u8>>, late: impl Into<Vec<u8>>) -> Self {
        Self {
            rdr: Cursor::new(response.into()).chain(Cursor::new(late.into())),
            written: Vec::new(),
            closed: false,
        }
    }
}

impl Read for MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.rdr.read(buf)
    }
}

impl Pending for MockTransport {
    fn has_pending(&mut self) -> io::Result<bool> {
        self.rdr.has_pending()
    }
}

impl Write for MockTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for MockTransport {
    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Transport whose writes always fail
pub struct BadWriteTransport;

impl Read for BadWriteTransport {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

impl Pending for BadWriteTransport {
    fn has_pending(&mut self) -> io::Result<bool> {
        Ok(false)
    }
}

impl Write for BadWriteTransport {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "A bad time"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for BadWriteTransport {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Expected outcome of decoding a bad response
#[derive(Debug, Clone, Copy)]
pub enum Expect {
    Net,
    Malformed,
    PayloadOrder,
    Server(&'static str, &'static str),
}

impl Expect {
    pub fn check(&self, err: &workq_client::WorkqError, resp: &[u8]) {
        use workq_client::WorkqError;

        let ok = match (self, err) {
            (Expect::Net, WorkqError::Net(_)) => true,
            (Expect::Malformed, WorkqError::Malformed(_)) => true,
            (Expect::PayloadOrder, WorkqError::PayloadMustFollowSize) => true,
            (Expect::Server(code, text), WorkqError::Response(e)) => {
                e.code() == *code && e.text() == *text
            }
            _ => false,
        };
        assert!(
            ok,
            "response {:?}: expected {:?}, got {:?}",
            String::from_utf8_lossy(resp),
            self,
            err
        );
    }
}

fn case(resp: &'static [u8], expect: Expect) -> (&'static [u8], Expect) {
    (resp, expect)
}

/// Responses every command must reject the same way
pub fn invalid_common_responses() -> Vec<(&'static [u8], Expect)> {
    vec![
        case(b"", Expect::Net),
        case(b"*OK\r\n", Expect::Malformed),
        case(b"-NOT-FOUND", Expect::Net),
        case(b"-  \r\n", Expect::Malformed),
        case(b"- \r\n", Expect::Malformed),
        case(b"-C \r\n", Expect::Malformed),
        case(b"\n", Expect::Malformed),
        case(b"a\n", Expect::Malformed),
        case(b"\r\n", Expect::Malformed),
        case(b"NOT-FOUND\r\n", Expect::Malformed),
        case(b"NOT-FOUND", Expect::Net),
        case(b"-NOT-FOUND\r\n", Expect::Server("NOT-FOUND", "")),
        case(b"-TIMED-OUT\r\n", Expect::Server("TIMED-OUT", "")),
        case(
            b"-CLIENT-ERROR Invalid Job ID\r\n",
            Expect::Server("CLIENT-ERROR", "Invalid Job ID"),
        ),
    ]
}

/// Bad job result replies, shared by `run` and `result`
pub fn invalid_result_responses() -> Vec<(&'static [u8], Expect)> {
    vec![
        // Invalid reply-count
        case(
            b"+OK 2\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 0 1\r\na\r\n",
            Expect::Malformed,
        ),
        // Missing result data
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 0 1\r\n\r\n",
            Expect::Malformed,
        ),
        // Result size greater than the data supplied
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 0 10\r\n\r\n",
            Expect::Malformed,
        ),
        // Extra field
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 1 1 1\r\na\r\n",
            Expect::Malformed,
        ),
        // Negative size
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 1 -1\r\na\r\n",
            Expect::Malformed,
        ),
        // Size over 1 MiB
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 1 1048577\r\na\r\n",
            Expect::Malformed,
        ),
        // Success flag must be 0 or 1
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 -1 1\r\na\r\n",
            Expect::Malformed,
        ),
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 2 1\r\na\r\n",
            Expect::Malformed,
        ),
        // Invalid id
        case(b"+OK 1\r\n* 1 1\r\na\r\n", Expect::Malformed),
        // Trailing bytes after the record
        case(
            b"+OK 1\r\n6ba7b810-9dad-11d1-80b4-00c04fd430c4 1 1\r\na\r\nx",
            Expect::Malformed,
        ),
        // Missing record
        case(b"+OK 1\r\n", Expect::Malformed),
    ]
}
