//! Error types for the roster stores.

use thiserror::Error;

/// Main error type for roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed persisted data: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage is locked by another process")]
    Locked,

    #[error("Invalid storage format: {0}")]
    InvalidFormat(String),

    #[error("Row {row} is out of range (roster has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
}

impl RosterError {
    /// Build a parse error from a failed decode.
    pub fn parse(err: serde_json::Error) -> Self {
        RosterError::Parse(err.to_string())
    }

    /// Whether this error came from malformed persisted data.
    pub fn is_parse(&self) -> bool {
        matches!(self, RosterError::Parse(_))
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        RosterError::Serialization(e.to_string())
    }
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
