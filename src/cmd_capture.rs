//! Capture subcommand handler.

use std::sync::Arc;

use tracing::info;

use stracked_capture::{CapturePool, CaptureRequest, CapturerConfig, SnapshotCapturer};
use stracked_config::Config;
use stracked_renderer_cdp::{CdpRenderer, CdpRendererConfig};

use crate::open_store;

/// Capture every URL for `site` through the worker pool.
pub(crate) async fn handle_capture(
    config: &Config,
    site: String,
    urls: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config).await?;
    let renderer = CdpRenderer::connect(CdpRendererConfig::from_config(config)).await?;

    let capturer = SnapshotCapturer::new(
        Arc::new(renderer),
        store,
        CapturerConfig::from_config(config),
    );
    let pool = CapturePool::new(Arc::new(capturer));

    let requests: Vec<_> = urls
        .into_iter()
        .map(|url| CaptureRequest::new(site.clone(), url))
        .collect();
    info!("Queued {} captures for site {}", requests.len(), site);

    let results = pool.run(requests).await;

    for result in &results {
        match &result.outcome {
            Ok(outcome) => println!(
                "{}  snapshot {}  {} elements ({} dropped)",
                result.request.url,
                outcome.snapshot.id(),
                outcome.snapshot.elements().len(),
                outcome.dropped
            ),
            Err(e) => println!("{}  failed: {}", result.request.url, e),
        }
    }

    let failed = results.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        return Err(format!("{} of {} captures failed", failed, results.len()).into());
    }
    Ok(())
}
