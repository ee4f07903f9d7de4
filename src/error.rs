//! Petalbook Error Types
//!
//! Centralized error handling for the name registry and resolution flow.

use thiserror::Error;

/// Central error type for Petalbook
#[derive(Error, Debug)]
pub enum PetalError {
    #[error("Unknown name kind: {0}")]
    UnknownKind(String),

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Selected entry {0} was not among the offered similar names")]
    UnknownSelection(String),

    #[error("No canonical name with id {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Petalbook operations
pub type PetalResult<T> = Result<T, PetalError>;
