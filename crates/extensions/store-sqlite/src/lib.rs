//! SQLite document store for stracked.
//!
//! Persists snapshots (with their element tables and images) and heatmaps.
//! Every save is a single transaction.

mod rows;
mod schema;
mod store;

pub use store::SqliteDocumentStore;
