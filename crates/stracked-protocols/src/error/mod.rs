//! Error types for the stracked protocol layer.

mod aggregate;
mod capture;
mod store;

pub use aggregate::*;
pub use capture::*;
pub use store::*;
