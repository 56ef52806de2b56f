//! Data model shared by the capturer, the aggregator and the stores.

mod event;
mod geometry;
mod heatmap;
mod selector;
mod snapshot;

pub use event::*;
pub use geometry::*;
pub use heatmap::*;
pub use selector::*;
pub use snapshot::*;
