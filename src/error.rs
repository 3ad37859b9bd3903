//! Error taxonomy
//!
//! One error enum for the whole crate. Record-level failures in bulk reads
//! are recovered locally (skip-and-continue); command-argument failures
//! abort the invocation with a one-line message.

use thiserror::Error;

/// Crate error types
#[derive(Debug, Error)]
pub enum Error {
    /// Unparseable date or number
    #[error("format error: {0}")]
    Format(String),

    /// Out-of-range day count or inverted date interval
    #[error("range error: {0}")]
    Range(String),

    /// Unknown product id, ambiguous resolve, missing file the command needs
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
