//! Error types for the Workq client
//!
//! Provides a unified error type for all operations. Transport failures,
//! server-reported errors and grammar violations are kept apart so callers
//! can tell a dead connection from a rejected command.

use std::fmt;

use thiserror::Error;

/// Result type alias using WorkqError
pub type Result<T> = std::result::Result<T, WorkqError>;

/// Unified error type for Workq client operations
#[derive(Debug, Error)]
pub enum WorkqError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Net Error: {0}")]
    Net(String),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Response(ResponseError),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Payload must immediately follow payload size when inspecting jobs")]
    PayloadMustFollowSize,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WorkqError {
    /// Shorthand for a grammar violation
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        WorkqError::Malformed(detail.into())
    }

    /// True for failures of the underlying stream
    pub fn is_transport(&self) -> bool {
        matches!(self, WorkqError::Net(_))
    }

    /// True for any response that broke the protocol grammar
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            WorkqError::Malformed(_) | WorkqError::PayloadMustFollowSize
        )
    }

    /// The server error, if this is one
    pub fn as_response(&self) -> Option<&ResponseError> {
        match self {
            WorkqError::Response(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WorkqError {
    fn from(err: std::io::Error) -> Self {
        WorkqError::Net(err.to_string())
    }
}

impl From<ResponseError> for WorkqError {
    fn from(err: ResponseError) -> Self {
        WorkqError::Response(err)
    }
}

/// A well-formed error line sent by the server: `-<CODE>[ <TEXT>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    code: String,
    text: String,
}

impl ResponseError {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }

    /// Machine-checkable code, e.g. `NOT-FOUND` or `TIMED-OUT`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Free text, empty when the server sent none
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.text)
        }
    }
}

impl std::error::Error for ResponseError {}
