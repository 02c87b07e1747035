//! Field validators shared by the response decoder
//!
//! Every helper maps a bad field to a malformed-response error.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, WorkqError};

/// Length of a canonical hyphenated UUID
const UUID_LEN: usize = 36;

/// Longest valid job name
const MAX_NAME_LEN: usize = 128;

/// Return a valid job id
///
/// Only the 36 character hyphenated form is accepted.
pub fn id_from_str(s: &str) -> Result<String> {
    if s.len() != UUID_LEN || Uuid::parse_str(s).is_err() {
        return Err(WorkqError::malformed(format!("invalid job id {:?}", s)));
    }
    Ok(s.to_string())
}

/// Return a valid job name: 1 to 128 chars of `[A-Za-z0-9_.-]`
pub fn name_from_str(s: &str) -> Result<String> {
    let valid = !s.is_empty()
        && s.len() <= MAX_NAME_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'));

    if !valid {
        return Err(WorkqError::malformed(format!("invalid job name {:?}", s)));
    }
    Ok(s.to_string())
}

/// Parse a non-negative decimal field
///
/// Stricter than `str::parse`: signs and whitespace are rejected.
pub fn parse_uint<T: std::str::FromStr>(field: &str, what: &str) -> Result<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WorkqError::malformed(format!("invalid {} {:?}", what, field)));
    }
    field
        .parse()
        .map_err(|_| WorkqError::malformed(format!("{} out of range {:?}", what, field)))
}

/// Parse a signed decimal field, optional leading `-`
pub fn parse_int(field: &str, what: &str) -> Result<i32> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WorkqError::malformed(format!("invalid {} {:?}", what, field)));
    }
    field
        .parse()
        .map_err(|_| WorkqError::malformed(format!("{} out of range {:?}", what, field)))
}

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_time(field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(field)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| WorkqError::malformed(format!("invalid timestamp {:?}", field)))
}

/// View a line as UTF-8 text
pub fn line_str(line: &[u8]) -> Result<&str> {
    std::str::from_utf8(line).map_err(|_| WorkqError::malformed("line is not valid UTF-8"))
}
