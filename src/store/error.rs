//! Store error types
//!
//! Defines all errors that can occur in the document store layer.

use thiserror::Error;

/// Errors that can occur in the document store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying SQLite error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Requested league does not exist
    #[error("League not found: {0}")]
    LeagueNotFound(String),

    /// A league with this name already exists
    #[error("League already exists: {0}")]
    LeagueExists(String),

    /// The user is already on the league's member list
    #[error("{user} is already a member of {league}")]
    AlreadyMember { league: String, user: String },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
