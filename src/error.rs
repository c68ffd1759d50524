//! Error types for stash.

use thiserror::Error;

/// Common error type for stash.
#[derive(Error, Debug)]
pub enum StashError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error for caller input (e.g. an unusable blob name).
    #[error("validation error: {0}")]
    Validation(String),

    /// The request as a whole is unusable, before any per-item work starts.
    #[error("malformed request: {0}")]
    RequestMalformed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for stash operations.
pub type Result<T> = std::result::Result<T, StashError>;
