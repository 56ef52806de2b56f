//! # Stracked Core
//!
//! The pure parts of the pipeline plus in-process collaborators.
//!
//! - [`selector`] - structural selector generation over any [`DomTree`]
//! - [`heatmap`] - resolving relative-position events against a snapshot
//! - [`aggregator`] - the aggregation service over a [`DocumentStore`]
//! - [`store`] / [`events`] - in-memory store and event sources
//!
//! [`DomTree`]: stracked_protocols::DomTree
//! [`DocumentStore`]: stracked_protocols::DocumentStore

pub mod aggregator;
pub mod events;
pub mod heatmap;
pub mod selector;
pub mod store;

pub use aggregator::{AggregationReport, HeatmapAggregator};
pub use events::{JsonlEventSource, MemoryEventSource, StoredEvent};
pub use heatmap::{Resolution, resolve, weight_for};
pub use selector::{generate, generate_all};
pub use store::MemoryDocumentStore;
