//! Raw table rows and their conversion into domain records.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use stracked_protocols::{
    BoundingBox, ElementRecord, Heatmap, HeatmapPoint, ImageFormat, Snapshot, StoreError, Viewport,
};

/// Fixed-width RFC 3339, so text order matches time order.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("timestamp {:?}: {}", value, e)))
}

fn parse_id(value: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(value).map_err(|e| StoreError::Corrupt(format!("id {:?}: {}", value, e)))
}

pub(crate) struct ElementRow {
    pub selector: String,
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

pub(crate) struct SnapshotRow {
    pub id: String,
    pub site_id: String,
    pub url: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub image: Vec<u8>,
    pub image_format: String,
    pub created_at: String,
    pub elements: Vec<ElementRow>,
}

impl SnapshotRow {
    pub fn into_snapshot(self) -> Result<Snapshot, StoreError> {
        let id = parse_id(&self.id)?;
        let created_at = parse_timestamp(&self.created_at)?;
        let format = ImageFormat::parse(&self.image_format).ok_or_else(|| {
            StoreError::Corrupt(format!("image format {:?} of snapshot {}", self.image_format, id))
        })?;

        let elements = self
            .elements
            .into_iter()
            .map(|e| {
                BoundingBox::new(e.top, e.left, e.bottom, e.right)
                    .map(|b| ElementRecord::new(e.selector, b))
                    .map_err(|err| StoreError::Corrupt(format!("element of snapshot {}: {}", id, err)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Snapshot::new(self.site_id, self.url, elements, self.image)
            .with_viewport(Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            })
            .with_image_format(format)
            .with_identity(id, created_at))
    }
}

pub(crate) struct HeatmapRow {
    pub id: String,
    pub site_id: String,
    pub snapshot_id: String,
    pub created_at: String,
    pub points: Vec<HeatmapPoint>,
}

impl HeatmapRow {
    pub fn into_heatmap(self) -> Result<Heatmap, StoreError> {
        let id = parse_id(&self.id)?;
        let snapshot_id = parse_id(&self.snapshot_id)?;
        let created_at = parse_timestamp(&self.created_at)?;
        Ok(Heatmap::new(self.site_id, snapshot_id, self.points).with_identity(id, created_at))
    }
}
