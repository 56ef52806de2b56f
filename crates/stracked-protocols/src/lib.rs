//! # Stracked Protocols
//!
//! Shared data model and collaborator traits for the stracked pipeline.
//! Contains only types and interface definitions - no backends.
//!
//! ## Core Traits
//!
//! - [`DomTree`] - Tree access used by the selector generator
//! - [`Renderer`] / [`PageHandle`] - Browsing and rendering capability
//! - [`DocumentStore`] - Snapshot and heatmap persistence
//! - [`EventSource`] - Time-series access to recorded interaction events

pub mod dom;
pub mod error;
pub mod render;
pub mod store;
pub mod types;

pub use dom::{DomTree, ElementHandle, NodeId, PageTree};
pub use error::{AggregateError, CaptureError, ElementReadError, EventSourceError, StoreError};
pub use render::{PageHandle, PageRequest, Renderer, Screenshot};
pub use store::{DocumentStore, EventSource};
pub use types::*;
