//! Heatmap aggregation service.

use std::sync::Arc;

use tracing::{info, warn};

use stracked_protocols::{AggregateError, DocumentStore, EventSource, Heatmap, InteractionEvent};

use crate::heatmap::resolve;

/// Result of one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregationReport {
    /// The persisted heatmap.
    pub heatmap: Heatmap,
    /// Events dropped because their selector was not in the snapshot.
    pub unresolved: usize,
    /// Events dropped because their relative position was out of range.
    pub invalid: usize,
}

/// Turns event batches into heatmaps against a site's latest snapshot.
pub struct HeatmapAggregator {
    store: Arc<dyn DocumentStore>,
}

impl HeatmapAggregator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Resolve `events` against the latest snapshot of `site_id` and persist
    /// the resulting heatmap.
    ///
    /// Fails with [`AggregateError::MissingSnapshot`] if the site has never
    /// been captured; per-event misses are only counted.
    pub async fn aggregate(
        &self,
        site_id: &str,
        events: &[InteractionEvent],
    ) -> Result<AggregationReport, AggregateError> {
        let snapshot = self
            .store
            .latest_snapshot(site_id)
            .await?
            .ok_or_else(|| AggregateError::MissingSnapshot {
                site_id: site_id.to_string(),
            })?;

        let resolution = resolve(&snapshot, events);

        if resolution.unresolved > 0 {
            warn!(
                "{} of {} events for site {} reference selectors missing from snapshot {}",
                resolution.unresolved,
                events.len(),
                site_id,
                snapshot.id()
            );
        }
        if resolution.invalid > 0 {
            warn!(
                "{} events for site {} had relative positions outside [0, 100]",
                resolution.invalid, site_id
            );
        }

        let heatmap = Heatmap::new(site_id, snapshot.id(), resolution.points);
        self.store.save_heatmap(heatmap.clone()).await?;

        info!(
            "Aggregated heatmap {} for site {}: {} points from {} events",
            heatmap.id(),
            site_id,
            heatmap.points().len(),
            events.len()
        );

        Ok(AggregationReport {
            heatmap,
            unresolved: resolution.unresolved,
            invalid: resolution.invalid,
        })
    }

    /// Pull the site's events from `source`, then [`aggregate`](Self::aggregate).
    pub async fn aggregate_from(
        &self,
        site_id: &str,
        source: &dyn EventSource,
    ) -> Result<AggregationReport, AggregateError> {
        if self.store.latest_snapshot(site_id).await?.is_none() {
            return Err(AggregateError::MissingSnapshot {
                site_id: site_id.to_string(),
            });
        }

        let events = source.query_events(site_id).await?;
        self.aggregate(site_id, &events).await
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
