use stracked_protocols::{BoundingBox, ElementRecord, HeatmapPoint, Snapshot};

use crate::events::MemoryEventSource;
use crate::store::MemoryDocumentStore;

use super::*;

const SITE: &str = "af9050e2-df49-41de-94a7-457c84a314c9";

fn button_snapshot() -> Snapshot {
    Snapshot::new(
        SITE,
        "http://localhost:4000",
        vec![ElementRecord::new(
            "/html/body/div[2]/button",
            BoundingBox::new(100.0, 50.0, 140.0, 150.0).unwrap(),
        )],
        vec![0u8; 8],
    )
}

#[tokio::test]
async fn test_missing_snapshot_is_hard_failure() {
    let store = Arc::new(MemoryDocumentStore::new());
    let aggregator = HeatmapAggregator::new(store.clone());
    let events = vec![InteractionEvent::new(SITE, "v", "/html/body", 1.0, 1.0, "click")];

    let err = aggregator.aggregate(SITE, &events).await.unwrap_err();

    assert!(matches!(err, AggregateError::MissingSnapshot { ref site_id } if site_id == SITE));
    assert!(store.heatmaps(SITE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_aggregate_persists_heatmap() {
    let store = Arc::new(MemoryDocumentStore::new());
    let snapshot = button_snapshot();
    let snapshot_id = snapshot.id();
    store.save_snapshot(snapshot).await.unwrap();

    let aggregator = HeatmapAggregator::new(store.clone());
    let events = vec![InteractionEvent::new(
        SITE,
        "v",
        "/html/body/div[2]/button",
        100.0,
        100.0,
        "click",
    )];

    let report = aggregator.aggregate(SITE, &events).await.unwrap();

    assert_eq!(report.heatmap.points(), &[HeatmapPoint::new(150.0, 140.0, 3)]);
    assert_eq!(report.heatmap.snapshot_id(), snapshot_id);
    assert_eq!(report.unresolved, 0);

    let stored = store.latest_heatmap(SITE).await.unwrap().unwrap();
    assert_eq!(stored, report.heatmap);
}

#[tokio::test]
async fn test_unresolved_counted_not_fatal() {
    let store = Arc::new(MemoryDocumentStore::new());
    store.save_snapshot(button_snapshot()).await.unwrap();
    let aggregator = HeatmapAggregator::new(store);

    let events: Vec<_> = (0..5)
        .map(|i| {
            let selector = if i == 2 { "/html/body/gone" } else { "/html/body/div[2]/button" };
            InteractionEvent::new(SITE, "v", selector, f64::from(i) * 25.0, 0.0, "move")
        })
        .collect();

    let report = aggregator.aggregate(SITE, &events).await.unwrap();

    assert_eq!(report.unresolved, 1);
    let xs: Vec<f64> = report.heatmap.points().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![50.0, 75.0, 125.0, 150.0]);
}

#[tokio::test]
async fn test_each_run_creates_new_heatmap() {
    let store = Arc::new(MemoryDocumentStore::new());
    store.save_snapshot(button_snapshot()).await.unwrap();
    let aggregator = HeatmapAggregator::new(store.clone());

    let first = aggregator.aggregate(SITE, &[]).await.unwrap();
    let second = aggregator.aggregate(SITE, &[]).await.unwrap();

    assert_ne!(first.heatmap.id(), second.heatmap.id());
    assert_eq!(store.heatmaps(SITE).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_aggregate_from_event_source() {
    let store = Arc::new(MemoryDocumentStore::new());
    store.save_snapshot(button_snapshot()).await.unwrap();
    let aggregator = HeatmapAggregator::new(store);

    let source = MemoryEventSource::with_events(vec![
        InteractionEvent::new(SITE, "v", "/html/body/div[2]/button", 0.0, 0.0, "scroll"),
        InteractionEvent::new("other", "v", "/html/body/div[2]/button", 0.0, 0.0, "click"),
    ]);

    let report = aggregator.aggregate_from(SITE, &source).await.unwrap();
    assert_eq!(report.heatmap.points(), &[HeatmapPoint::new(50.0, 100.0, 1)]);
}

#[tokio::test]
async fn test_aggregate_from_without_snapshot() {
    let aggregator = HeatmapAggregator::new(Arc::new(MemoryDocumentStore::new()));
    let source = MemoryEventSource::new();

    let result = aggregator.aggregate_from(SITE, &source).await;
    assert!(matches!(result, Err(AggregateError::MissingSnapshot { .. })));
}
