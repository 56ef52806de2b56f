//! Snapshot capture errors.

use thiserror::Error;

use super::store::StoreError;

/// Failure of a whole capture invocation. Nothing is persisted.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Page load failed for {url}: {reason}")]
    PageLoad { url: String, reason: String },

    #[error("Page load timed out after {secs}s: {url}")]
    Timeout { url: String, secs: u64 },

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Element enumeration failed: {0}")]
    Enumeration(String),

    #[error("Renderer error: {0}")]
    Renderer(String),

    #[error("Snapshot store error: {0}")]
    Store(#[from] StoreError),
}

/// Failure to read one element's box. Non-fatal: the element is dropped.
#[derive(Debug, Error)]
pub enum ElementReadError {
    #[error("Element has no layout box: {0}")]
    NoLayout(String),

    #[error("Invalid bounding box (top={top}, left={left}, bottom={bottom}, right={right})")]
    InvalidBox {
        top: f64,
        left: f64,
        bottom: f64,
        right: f64,
    },

    #[error("Element read failed: {0}")]
    Backend(String),
}
