//! Browsing and rendering capability.
//!
//! The snapshot capturer is written against these traits only; the engine
//! behind them (a CDP-driven browser, a test double) is swappable.

use async_trait::async_trait;
use bytes::Bytes;

use crate::dom::{ElementHandle, PageTree};
use crate::error::{CaptureError, ElementReadError};
use crate::types::{BoundingBox, ImageFormat, Viewport};

/// A page load request.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub url: String,
    pub viewport: Viewport,
}

impl PageRequest {
    pub fn new(url: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            url: url.into(),
            viewport,
        }
    }
}

/// Encoded full-page image.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub data: Bytes,
    pub format: ImageFormat,
}

/// Loads pages, each into its own isolated browsing context.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Returns the renderer ID.
    fn id(&self) -> &str;

    /// Load a page and return once the document is ready.
    async fn load_page(&self, request: &PageRequest) -> Result<Box<dyn PageHandle>, CaptureError>;
}

/// A loaded page living in an isolated context.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Element tree of the rendered document, in document order.
    async fn enumerate_elements(&self) -> Result<PageTree, CaptureError>;

    /// Box of one element in page pixels.
    async fn bounding_box(&self, element: ElementHandle) -> Result<BoundingBox, ElementReadError>;

    /// Full-page image.
    async fn screenshot(&self) -> Result<Screenshot, CaptureError>;

    /// Dispose the browsing context.
    async fn close(&self) -> Result<(), CaptureError>;
}
