//! Snapshot capture for a single page.

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use stracked_core::generate_all;
use stracked_protocols::{
    CaptureError, DocumentStore, ElementReadError, ElementRecord, PageHandle, PageRequest,
    Renderer, Snapshot, SnapshotKey,
};

use crate::config::CapturerConfig;

/// A persisted snapshot and what was left out of it.
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub snapshot: Arc<Snapshot>,
    pub key: SnapshotKey,
    /// Elements skipped because their box could not be read.
    pub dropped: usize,
}

/// Renders a page and records its layout as a [`Snapshot`].
pub struct SnapshotCapturer {
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn DocumentStore>,
    config: CapturerConfig,
}

impl SnapshotCapturer {
    pub fn new(
        renderer: Arc<dyn Renderer>,
        store: Arc<dyn DocumentStore>,
        config: CapturerConfig,
    ) -> Self {
        Self {
            renderer,
            store,
            config,
        }
    }

    pub fn config(&self) -> &CapturerConfig {
        &self.config
    }

    /// Capture `url` for `site_id` and persist the result.
    ///
    /// Nothing is persisted unless both the image and the element list
    /// were obtained.
    pub async fn capture(&self, site_id: &str, url: &str) -> Result<CaptureOutcome, CaptureError> {
        let (snapshot, dropped) = self.snapshot_page(site_id, url).await?;
        let snapshot = Arc::new(snapshot);
        let key = self.store.save_snapshot(Snapshot::clone(&snapshot)).await?;

        info!(
            "Captured {} for site {}: {} elements, {} dropped",
            url,
            site_id,
            snapshot.elements().len(),
            dropped
        );

        Ok(CaptureOutcome {
            snapshot,
            key,
            dropped,
        })
    }

    async fn snapshot_page(&self, site_id: &str, url: &str) -> Result<(Snapshot, usize), CaptureError> {
        let request = PageRequest::new(url, self.config.viewport);
        debug!("Loading {} via renderer {}", url, self.renderer.id());

        let page = match timeout(self.config.page_load_timeout, self.renderer.load_page(&request)).await {
            Ok(page) => page?,
            Err(_) => {
                return Err(CaptureError::Timeout {
                    url: url.to_string(),
                    secs: self.config.page_load_timeout.as_secs(),
                });
            }
        };

        let result = self.read_page(page.as_ref(), site_id, url).await;

        if let Err(e) = page.close().await {
            warn!("Failed to close page for {}: {}", url, e);
        }

        result
    }

    async fn read_page(
        &self,
        page: &dyn PageHandle,
        site_id: &str,
        url: &str,
    ) -> Result<(Snapshot, usize), CaptureError> {
        if !self.config.settle.is_zero() {
            tokio::time::sleep(self.config.settle).await;
        }

        let screenshot = page.screenshot().await?;
        let tree = page.enumerate_elements().await?;

        let mut elements = Vec::with_capacity(tree.len());
        let mut dropped = 0;

        for (node, selector) in generate_all(&tree) {
            let Some(handle) = tree.handle(node) else {
                dropped += 1;
                continue;
            };

            let bounding_box = page.bounding_box(handle).await.and_then(|b| {
                if b.is_valid() {
                    Ok(b)
                } else {
                    Err(ElementReadError::InvalidBox {
                        top: b.top,
                        left: b.left,
                        bottom: b.bottom,
                        right: b.right,
                    })
                }
            });

            match bounding_box {
                Ok(b) => elements.push(ElementRecord::new(selector, b)),
                Err(e) => {
                    dropped += 1;
                    debug!("Dropping {}: {}", selector, e);
                }
            }
        }

        if dropped > 0 {
            warn!("{} of {} elements on {} had no readable box", dropped, tree.len(), url);
        }

        let recorded = elements.len();
        let snapshot = Snapshot::new(site_id, url, elements, screenshot.data)
            .with_viewport(self.config.viewport)
            .with_image_format(screenshot.format);

        let repeated = recorded - snapshot.elements().len();
        if repeated > 0 {
            warn!("{} elements on {} repeated an earlier selector", repeated, url);
            dropped += repeated;
        }

        Ok((snapshot, dropped))
    }
}

#[cfg(test)]
#[path = "capturer_tests.rs"]
mod tests;
