//! In-memory document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use stracked_protocols::{DocumentStore, Heatmap, Snapshot, SnapshotKey, StoreError};

#[derive(Default)]
struct Inner {
    snapshots: HashMap<String, Vec<(SnapshotKey, Arc<Snapshot>)>>,
    heatmaps: HashMap<String, Vec<Heatmap>>,
    sequence: u64,
}

/// In-memory document store for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl MemoryDocumentStore {
    /// Create a new memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots stored for a site.
    pub async fn snapshot_count(&self, site_id: &str) -> usize {
        let inner = self.inner.read().await;
        inner.snapshots.get(site_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn save_snapshot(&self, snapshot: Snapshot) -> Result<SnapshotKey, StoreError> {
        let mut inner = self.inner.write().await;

        let site_snapshots = inner.snapshots.get(snapshot.site_id());
        if site_snapshots.is_some_and(|list| list.iter().any(|(_, s)| s.id() == snapshot.id())) {
            return Err(StoreError::Duplicate(snapshot.id().to_string()));
        }

        inner.sequence += 1;
        let key = SnapshotKey {
            created_at: snapshot.created_at(),
            sequence: inner.sequence,
        };

        debug!(
            "Saving snapshot {} for site {} ({} elements)",
            snapshot.id(),
            snapshot.site_id(),
            snapshot.elements().len()
        );
        inner
            .snapshots
            .entry(snapshot.site_id().to_string())
            .or_default()
            .push((key, Arc::new(snapshot)));

        Ok(key)
    }

    async fn latest_snapshot(&self, site_id: &str) -> Result<Option<Arc<Snapshot>>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.snapshots.get(site_id).and_then(|list| {
            list.iter()
                .max_by_key(|(key, _)| *key)
                .map(|(_, snapshot)| snapshot.clone())
        }))
    }

    async fn save_heatmap(&self, heatmap: Heatmap) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let list = inner.heatmaps.entry(heatmap.site_id().to_string()).or_default();

        if list.iter().any(|h| h.id() == heatmap.id()) {
            return Err(StoreError::Duplicate(heatmap.id().to_string()));
        }

        debug!("Saving heatmap {} for site {}", heatmap.id(), heatmap.site_id());
        list.push(heatmap);
        Ok(())
    }

    async fn latest_heatmap(&self, site_id: &str) -> Result<Option<Heatmap>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.heatmaps.get(site_id).and_then(|list| list.last().cloned()))
    }

    async fn heatmaps(&self, site_id: &str) -> Result<Vec<Heatmap>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.heatmaps.get(site_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
