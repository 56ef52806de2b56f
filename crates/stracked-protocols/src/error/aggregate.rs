//! Heatmap aggregation errors.

use thiserror::Error;

use super::store::{EventSourceError, StoreError};

/// Failure of a whole aggregation call. Per-event misses are not errors.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// No snapshot exists yet for the site. Capture one first.
    #[error("No snapshot exists for site {site_id}")]
    MissingSnapshot { site_id: String },

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("Event source error: {0}")]
    Events(#[from] EventSourceError),
}

impl AggregateError {
    /// Whether repeating the same call may succeed without other action.
    pub fn is_retryable(&self) -> bool {
        match self {
            AggregateError::MissingSnapshot { .. } => false,
            AggregateError::Store(e) => e.is_transient(),
            AggregateError::Events(e) => e.is_transient(),
        }
    }
}
