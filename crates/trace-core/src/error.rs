//! Error types for Trace core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Trace operations.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Core error type for Trace operations.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Persistence backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication service rejected the request
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Remote data service failure
    #[error("Remote error: {0}")]
    Remote(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        TraceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(err: serde_json::Error) -> Self {
        TraceError::Validation(err.to_string())
    }
}

impl From<rusqlite::Error> for TraceError {
    fn from(err: rusqlite::Error) -> Self {
        TraceError::Storage(format!("SQLite error: {}", err))
    }
}
