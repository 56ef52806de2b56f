//! Heatmaps produced by aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weighted point in absolute page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub x: f64,
    pub y: f64,
    #[serde(alias = "value")]
    pub weight: u32,
}

impl HeatmapPoint {
    pub fn new(x: f64, y: f64, weight: u32) -> Self {
        Self { x, y, weight }
    }
}

/// Ordered, weighted set of points for one site, resolved against one snapshot.
///
/// Points keep event arrival order. A heatmap is never changed after creation;
/// each aggregation run produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    id: Uuid,
    site_id: String,
    snapshot_id: Uuid,
    points: Vec<HeatmapPoint>,
    created_at: DateTime<Utc>,
}

impl Heatmap {
    /// Create a heatmap stamped with the current time.
    pub fn new(site_id: impl Into<String>, snapshot_id: Uuid, points: Vec<HeatmapPoint>) -> Self {
        Self {
            id: Uuid::new_v4(),
            site_id: site_id.into(),
            snapshot_id,
            points,
            created_at: Utc::now(),
        }
    }

    /// Restore the identity of a previously persisted heatmap.
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

    /// Snapshot the points were resolved against.
    pub fn snapshot_id(&self) -> Uuid {
        self.snapshot_id
    }

    pub fn points(&self) -> &[HeatmapPoint] {
        &self.points
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of all point weights.
    pub fn total_weight(&self) -> u64 {
        self.points.iter().map(|p| u64::from(p.weight)).sum()
    }
}
