//! Persistence collaborators.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{EventSourceError, StoreError};
use crate::types::{Heatmap, InteractionEvent, Snapshot, SnapshotKey};

/// Keyed, timestamp-ordered store for snapshots and heatmaps.
///
/// Both record kinds are append-only: saving never replaces an existing
/// record, and nothing read back can be mutated in place.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a snapshot and return its position in the site's order.
    async fn save_snapshot(&self, snapshot: Snapshot) -> Result<SnapshotKey, StoreError>;

    /// Most recent snapshot for the site by [`SnapshotKey`] order.
    async fn latest_snapshot(&self, site_id: &str) -> Result<Option<Arc<Snapshot>>, StoreError>;

    /// Persist a heatmap.
    async fn save_heatmap(&self, heatmap: Heatmap) -> Result<(), StoreError>;

    /// Most recently saved heatmap for the site.
    async fn latest_heatmap(&self, site_id: &str) -> Result<Option<Heatmap>, StoreError>;

    /// All heatmaps for the site, oldest first.
    async fn heatmaps(&self, site_id: &str) -> Result<Vec<Heatmap>, StoreError>;
}

/// Time-series access to recorded interaction events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// All events recorded for the site, in arrival order.
    async fn query_events(&self, site_id: &str) -> Result<Vec<InteractionEvent>, EventSourceError>;
}
