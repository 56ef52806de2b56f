//! # Stracked Capture
//!
//! Page snapshot capture.
//!
//! ## Features
//!
//! - Loads a page through a [`Renderer`](stracked_protocols::Renderer) under a timeout
//! - Generates a structural selector and reads a box for every element
//! - Drops unreadable elements, fails the capture if the image cannot be taken
//! - Bounded worker pool: one isolated browsing context per in-flight capture

pub mod capturer;
pub mod config;
pub mod pool;
pub mod request;

#[cfg(test)]
mod test_support;

pub use capturer::{CaptureOutcome, SnapshotCapturer};
pub use config::CapturerConfig;
pub use pool::{CapturePool, CaptureResult};
pub use request::CaptureRequest;
