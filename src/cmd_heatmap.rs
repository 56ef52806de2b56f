//! Heatmap subcommand handlers.

use std::path::PathBuf;

use tracing::info;

use stracked_config::{Config, ConfigLoader};
use stracked_core::{HeatmapAggregator, JsonlEventSource};
use stracked_protocols::DocumentStore;

use crate::open_store;

/// Aggregate the site's recorded events into a new heatmap.
pub(crate) async fn handle_aggregate(
    config: &Config,
    site: &str,
    events: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let events_path = match events {
        Some(p) => p,
        None => config
            .events
            .path
            .as_deref()
            .map(|p| PathBuf::from(ConfigLoader::expand_path(p)))
            .ok_or("No event file given and events.path is not configured")?,
    };

    let store = open_store(config).await?;
    let aggregator = HeatmapAggregator::new(store);
    let source = JsonlEventSource::new(events_path);

    info!("Aggregating site {} from {}", site, source.path().display());
    let report = aggregator.aggregate_from(site, &source).await?;

    println!("Heatmap {}", report.heatmap.id());
    println!("  snapshot:   {}", report.heatmap.snapshot_id());
    println!("  points:     {}", report.heatmap.points().len());
    println!("  weight:     {}", report.heatmap.total_weight());
    println!("  unresolved: {}", report.unresolved);
    println!("  invalid:    {}", report.invalid);
    Ok(())
}

/// Print the latest snapshot and heatmap of a site.
pub(crate) async fn handle_show(
    config: &Config,
    site: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config).await?;

    if json {
        let heatmap = store
            .latest_heatmap(site)
            .await?
            .ok_or_else(|| format!("No heatmap for site {}", site))?;
        println!("{}", serde_json::to_string_pretty(&heatmap)?);
        return Ok(());
    }

    match store.latest_snapshot(site).await? {
        Some(snapshot) => {
            println!("Snapshot {}", snapshot.id());
            println!("  url:      {}", snapshot.url());
            println!("  captured: {}", snapshot.created_at().to_rfc3339());
            println!(
                "  viewport: {}x{}",
                snapshot.viewport().width,
                snapshot.viewport().height
            );
            println!("  elements: {}", snapshot.elements().len());
            println!(
                "  image:    {} bytes ({})",
                snapshot.image().len(),
                snapshot.image_format().as_str()
            );
        }
        None => println!("No snapshot for site {}", site),
    }

    let heatmaps = store.heatmaps(site).await?;
    match heatmaps.last() {
        Some(latest) => {
            println!("Heatmap {} ({} total)", latest.id(), heatmaps.len());
            println!("  created: {}", latest.created_at().to_rfc3339());
            println!("  points:  {}", latest.points().len());
            println!("  weight:  {}", latest.total_weight());
        }
        None => println!("No heatmap for site {}", site),
    }
    Ok(())
}

/// Write the latest snapshot image to `output`.
pub(crate) async fn handle_export_image(
    config: &Config,
    site: &str,
    mut output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config).await?;
    let snapshot = store
        .latest_snapshot(site)
        .await?
        .ok_or_else(|| format!("No snapshot for site {}", site))?;

    if output.extension().is_none() {
        output.set_extension(snapshot.image_format().as_str());
    }

    tokio::fs::write(&output, snapshot.image()).await?;
    println!(
        "Wrote {} ({} bytes, {})",
        output.display(),
        snapshot.image().len(),
        snapshot.image_format().mime_type()
    );
    Ok(())
}
