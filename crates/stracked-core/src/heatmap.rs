//! Resolving interaction events against a snapshot.

use stracked_protocols::{EventType, HeatmapPoint, InteractionEvent, Snapshot};
use tracing::{debug, trace};

/// Weight of click-class events.
pub const CLICK_WEIGHT: u32 = 3;

/// Weight of every other event type.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Weight of one event by its type.
pub fn weight_for(event_type: &EventType) -> u32 {
    if event_type.is_click_class() {
        CLICK_WEIGHT
    } else {
        DEFAULT_WEIGHT
    }
}

/// Points resolved from one event batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Resolved points in event input order.
    pub points: Vec<HeatmapPoint>,
    /// Events whose selector is absent from the snapshot.
    pub unresolved: usize,
    /// Events whose relative position is outside `[0, 100]`.
    pub invalid: usize,
}

/// Map every event onto the snapshot's boxes.
///
/// Events that cannot be placed are counted and skipped; they never fail
/// the batch.
pub fn resolve(snapshot: &Snapshot, events: &[InteractionEvent]) -> Resolution {
    let lookup = snapshot.lookup();
    let mut resolution = Resolution {
        points: Vec::with_capacity(events.len()),
        ..Default::default()
    };

    for event in events {
        if event.site_id != snapshot.site_id() {
            debug!(
                "Event for site {} does not belong to snapshot site {}",
                event.site_id,
                snapshot.site_id()
            );
            resolution.unresolved += 1;
            continue;
        }

        let Some(bbox) = lookup.get(event.selector.as_str()) else {
            trace!("Unresolved selector: {}", event.selector);
            resolution.unresolved += 1;
            continue;
        };

        if !event.has_valid_position() {
            trace!(
                "Invalid relative position ({}, {}) for {}",
                event.relative_x, event.relative_y, event.selector
            );
            resolution.invalid += 1;
            continue;
        }

        let (x, y) = bbox.point_at(event.relative_x, event.relative_y);
        resolution
            .points
            .push(HeatmapPoint::new(x, y, weight_for(&event.event_type)));
    }

    resolution
}

#[cfg(test)]
#[path = "heatmap_tests.rs"]
mod tests;
