//! Structural page snapshots.

use std::collections::{HashMap, HashSet};
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geometry::{BoundingBox, Viewport};
use super::selector::Selector;

/// One captured element: its selector and its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub selector: Selector,
    #[serde(rename = "coordinates")]
    pub bounding_box: BoundingBox,
}

impl ElementRecord {
    pub fn new(selector: impl Into<Selector>, bounding_box: BoundingBox) -> Self {
        Self {
            selector: selector.into(),
            bounding_box,
        }
    }
}

/// Encoding of the captured page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Webp,
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Webp => "webp",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Webp => "image/webp",
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// Parse the lowercase name used in config and storage.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "webp" => Some(ImageFormat::Webp),
            "png" => Some(ImageFormat::Png),
            "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }
}

/// Total order used to pick the most recent snapshot of a site.
///
/// Later `created_at` wins; equal timestamps fall back to the store-assigned
/// sequence, which only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotKey {
    pub created_at: DateTime<Utc>,
    pub sequence: u64,
}

/// Immutable record of a page's element layout plus its captured image.
///
/// Selectors are unique within one snapshot.
#[derive(Clone)]
pub struct Snapshot {
    id: Uuid,
    site_id: String,
    url: String,
    viewport: Viewport,
    elements: Vec<ElementRecord>,
    image: Bytes,
    image_format: ImageFormat,
    created_at: DateTime<Utc>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time.
    ///
    /// Elements keep their order; a repeated selector keeps its first record.
    pub fn new(
        site_id: impl Into<String>,
        url: impl Into<String>,
        elements: Vec<ElementRecord>,
        image: impl Into<Bytes>,
    ) -> Self {
        let mut seen = HashSet::new();
        let elements = elements
            .into_iter()
            .filter(|r| seen.insert(r.selector.clone()))
            .collect();

        Self {
            id: Uuid::new_v4(),
            site_id: site_id.into(),
            url: url.into(),
            viewport: Viewport::default(),
            elements,
            image: image.into(),
            image_format: ImageFormat::default(),
            created_at: Utc::now(),
        }
    }

    /// Set the viewport the page was rendered into.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the image encoding.
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    /// Restore the identity of a previously persisted snapshot.
    pub fn with_identity(mut self, id: Uuid, created_at: DateTime<Utc>) -> Self {
        self.id = id;
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Element records in document order.
    pub fn elements(&self) -> &[ElementRecord] {
        &self.elements
    }

    pub fn image(&self) -> &Bytes {
        &self.image
    }

    pub fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Selector to box lookup over all element records.
    pub fn lookup(&self) -> HashMap<&str, BoundingBox> {
        self.elements
            .iter()
            .map(|r| (r.selector.as_str(), r.bounding_box))
            .collect()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("site_id", &self.site_id)
            .field("url", &self.url)
            .field("viewport", &self.viewport)
            .field("elements", &self.elements.len())
            .field("image_bytes", &self.image.len())
            .field("image_format", &self.image_format)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
