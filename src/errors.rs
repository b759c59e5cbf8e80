//! Error types for the Datagen SDK
//!
//! Every failure surfaced by the client is a [`DatagenError`]. Callers that
//! only care about the broad category (auth vs. HTTP vs. tool) can match on
//! [`DatagenError::kind`].

use std::fmt;
use thiserror::Error;

/// Main error type for the Datagen SDK
#[derive(Error, Debug)]
pub enum DatagenError {
    /// Missing credential at construction, or HTTP 401/403 at call time
    #[error("{0}")]
    Auth(String),

    /// Caller supplied an unusable argument; no request was sent
    #[error("{0}")]
    InvalidArgument(String),

    /// Server answered with a non-auth error status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a successful outer envelope
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network-level failure (connect, timeout, broken body)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The tool ran but reported failure
    #[error("{0}")]
    Tool(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fallback when no more specific cause is known
    #[error("{0}")]
    Unknown(String),
}

/// Broad error category, one per row of the client's error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    InvalidArgument,
    Http,
    Tool,
    Config,
    Unknown,
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, DatagenError>;

impl DatagenError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatagenError::Auth(_) => ErrorKind::Authentication,
            DatagenError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DatagenError::Status { .. }
            | DatagenError::UnexpectedResponse(_)
            | DatagenError::Transport(_) => ErrorKind::Http,
            DatagenError::Tool(_) => ErrorKind::Tool,
            DatagenError::Config(_) => ErrorKind::Config,
            DatagenError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Whether another attempt may succeed.
    ///
    /// Only HTTP-category failures are transient. An auth rejection or an
    /// explicit tool failure will not change on retry.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Http
    }

    /// HTTP status code, when the failure came from an error status
    pub fn status(&self) -> Option<u16> {
        match self {
            DatagenError::Status { status, .. } => Some(*status),
            DatagenError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Authentication => "authentication error",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Http => "HTTP error",
            ErrorKind::Tool => "tool error",
            ErrorKind::Config => "configuration error",
            ErrorKind::Unknown => "error",
        };
        f.write_str(name)
    }
}
