//! Error types for LovesNotes.

use thiserror::Error;

/// Result type alias using LovesNotes' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for LovesNotes operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Non-SQL storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Text generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),
}

impl Error {
    /// True when the error means the target note does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NoteNotFound(_))
    }

    /// True for failures of the note store itself (unreachable, internal).
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Storage(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
