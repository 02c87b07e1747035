//! Non-blocking readiness of a byte source
//!
//! A counted reply must end exactly where its last record ends. Bytes the
//! read buffer has not pulled in yet are only visible by asking the source.

use std::io::{self, Chain, Cursor, Read};

/// A readable source that can tell whether more bytes are ready
pub trait Pending: Read {
    /// True if at least one byte can be read right now
    ///
    /// Must not block. End of stream is not pending data.
    fn has_pending(&mut self) -> io::Result<bool>;
}

impl<T: AsRef<[u8]>> Pending for Cursor<T> {
    fn has_pending(&mut self) -> io::Result<bool> {
        Ok(self.position() < self.get_ref().as_ref().len() as u64)
    }
}

impl Pending for &[u8] {
    fn has_pending(&mut self) -> io::Result<bool> {
        Ok(!self.is_empty())
    }
}

impl<A: Pending, B: Pending> Pending for Chain<A, B> {
    fn has_pending(&mut self) -> io::Result<bool> {
        let (first, second) = self.get_mut();
        Ok(first.has_pending()? || second.has_pending()?)
    }
}
