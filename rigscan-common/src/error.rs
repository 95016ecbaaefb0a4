//! Common error types for RigScan

use thiserror::Error;

/// Common result type for RigScan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across RigScan crates
#[derive(Error, Debug)]
pub enum Error {
    /// Ingest payload could not be reconciled into a HardwareProfile
    #[error("Malformed input at {path}: {reason}")]
    MalformedInput { path: String, reason: String },

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream recommendation generation failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Storage backend failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a malformed-input error at a JSON path.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
