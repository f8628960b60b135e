//! Failure values carried by result chains.
//!
//! Every variant holds plain data so failures stay `Clone` and comparable,
//! which is what lets callers match a chain's outcome against a sentinel.

use std::path::PathBuf;

use thiserror::Error;

/// Core failure type for monad chains.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Raised by [`Result::on_error`](crate::Result::on_error) when a chain
    /// that had to fail succeeded instead.
    #[error("Error was expected")]
    FailureExpected,

    // I/O errors
    #[error("failed to read file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("failed to write file '{path}': {reason}")]
    FileWriteFailed { path: PathBuf, reason: String },

    #[error("failed to create directory '{path}': {reason}")]
    DirectoryCreationFailed { path: PathBuf, reason: String },

    #[error("resource handle '{name}' is already closed")]
    HandleClosed { name: String },

    // Network errors
    #[error("request to '{url}' failed: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("Expected status code to be 200, but got: {status}")]
    UnexpectedStatus { url: String, status: String },

    // Configuration errors
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {reason}")]
    TomlParseFailed { reason: String },

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl Error {
    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a file write error.
    pub fn file_write_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileWriteFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a directory creation error.
    pub fn directory_creation_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DirectoryCreationFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a closed-handle error.
    pub fn handle_closed(name: impl Into<String>) -> Self {
        Self::HandleClosed { name: name.into() }
    }

    /// Create a request error.
    pub fn request_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an unexpected status error.
    pub fn unexpected_status(url: impl Into<String>, status: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status: status.into(),
        }
    }

    /// Create a TOML parse error.
    pub fn toml_parse_failed(reason: impl Into<String>) -> Self {
        Self::TomlParseFailed {
            reason: reason.into(),
        }
    }

    /// Whether this is the `FailureExpected` sentinel.
    #[must_use]
    pub const fn is_failure_expected(&self) -> bool {
        matches!(self, Self::FailureExpected)
    }
}

/// Failure types that can express "a failure was expected but none occurred".
///
/// [`Result::on_error`](crate::Result::on_error) needs this to build its
/// inverted outcome.
pub trait ExpectedFailure {
    /// The sentinel failure value.
    fn failure_expected() -> Self;
}

impl ExpectedFailure for Error {
    fn failure_expected() -> Self {
        Self::FailureExpected
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Unknown(err.to_string())
    }
}
