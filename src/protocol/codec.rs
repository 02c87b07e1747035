//! Command encoder
//!
//! Renders commands into their exact wire form.
//!
//! ## Wire Format
//!
//! ```text
//! <keyword> <field> <field> ... [<flags>]\r\n
//! [<block bytes>\r\n]
//! ```
//!
//! Commands that carry data (`add`, `run`, `schedule`, `complete`, `fail`)
//! declare the block's byte length as the last mandatory field and follow the
//! command line with the raw block. Optional flags come after the mandatory
//! fields in the fixed order `-priority`, `-max-attempts`, `-max-fails`.

use std::io::Write;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;
use super::{Command, CRLF};

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to bytes
pub fn encode_command(command: &Command) -> Bytes {
    let keyword = command.command_type().keyword();

    match command {
        Command::Add(job) => {
            let line = format!(
                "{} {} {} {} {} {}{}",
                keyword,
                job.id,
                job.name,
                job.ttr,
                job.ttl,
                job.payload.len(),
                flags(job.priority, job.max_attempts, job.max_fails),
            );
            frame(&line, Some(job.payload.as_slice()))
        }
        Command::Run(job) => {
            let line = format!(
                "{} {} {} {} {} {}{}",
                keyword,
                job.id,
                job.name,
                job.ttr,
                job.timeout,
                job.payload.len(),
                flags(job.priority, 0, 0),
            );
            frame(&line, Some(job.payload.as_slice()))
        }
        Command::Schedule(job) => {
            let line = format!(
                "{} {} {} {} {} {} {}{}",
                keyword,
                job.id,
                job.name,
                job.ttr,
                job.ttl,
                job.time,
                job.payload.len(),
                flags(job.priority, job.max_attempts, job.max_fails),
            );
            frame(&line, Some(job.payload.as_slice()))
        }
        Command::Result { id, timeout } => {
            frame(&format!("{} {} {}", keyword, id, timeout), None)
        }
        Command::Lease { names, timeout } => {
            frame(&format!("{} {} {}", keyword, names.join(" "), timeout), None)
        }
        Command::Complete { id, result } | Command::Fail { id, result } => {
            frame(&format!("{} {} {}", keyword, id, result.len()), Some(*result))
        }
        Command::Delete { id } => frame(&format!("{} {}", keyword, id), None),
        Command::InspectJobs {
            name,
            cursor_offset,
            limit,
        } => frame(
            &format!("{} {} {} {}", keyword, name, cursor_offset, limit),
            None,
        ),
    }
}

/// Render optional flags with their leading separator
///
/// Zero values are left off. Returns an empty string when no flag is set so
/// the command line never ends in a stray space.
fn flags(priority: i32, max_attempts: u8, max_fails: u8) -> String {
    let mut flags = Vec::with_capacity(3);
    if priority != 0 {
        flags.push(format!("-priority={}", priority));
    }
    if max_attempts != 0 {
        flags.push(format!("-max-attempts={}", max_attempts));
    }
    if max_fails != 0 {
        flags.push(format!("-max-fails={}", max_fails));
    }

    if flags.is_empty() {
        String::new()
    } else {
        format!(" {}", flags.join(" "))
    }
}

/// Terminate the command line and append the optional data block
fn frame(line: &str, block: Option<&[u8]>) -> Bytes {
    let block_len = block.map_or(0, |b| b.len() + CRLF.len());
    let mut buf = BytesMut::with_capacity(line.len() + CRLF.len() + block_len);

    buf.put_slice(line.as_bytes());
    buf.put_slice(CRLF);
    if let Some(block) = block {
        buf.put_slice(block);
        buf.put_slice(CRLF);
    }

    buf.freeze()
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a command to a stream
///
/// The whole frame goes out in one `write_all`; nothing is retried.
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
