//! Document store and event source errors.

use std::io::ErrorKind;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    /// A record with this id was already written; records are never replaced.
    #[error("Record already exists: {0}")]
    Duplicate(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Connection problems may clear up on their own.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

#[derive(Debug, Error)]
pub enum EventSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EventSourceError {
    /// A missing or unreadable source stays that way until someone fixes it.
    pub fn is_transient(&self) -> bool {
        match self {
            EventSourceError::Io(e) => !matches!(
                e.kind(),
                ErrorKind::NotFound
                    | ErrorKind::PermissionDenied
                    | ErrorKind::InvalidInput
                    | ErrorKind::InvalidData
                    | ErrorKind::IsADirectory
            ),
        }
    }
}
