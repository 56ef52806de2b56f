//! Bounded pool of concurrent captures.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinError;
use tracing::{debug, error, info};

use stracked_protocols::CaptureError;

use crate::capturer::{CaptureOutcome, SnapshotCapturer};
use crate::request::CaptureRequest;

/// Outcome of one request.
#[derive(Debug)]
pub struct CaptureResult {
    pub request: CaptureRequest,
    pub outcome: Result<CaptureOutcome, CaptureError>,
}

impl CaptureResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs captures with at most `max_workers` pages loaded at once.
///
/// Every capture gets its own browsing context from the renderer; a failed
/// capture never affects the others.
pub struct CapturePool {
    capturer: Arc<SnapshotCapturer>,
    semaphore: Arc<Semaphore>,
    max_workers: usize,
    completed: Arc<AtomicU64>,
    failed: Arc<AtomicU64>,
}

impl CapturePool {
    pub fn new(capturer: Arc<SnapshotCapturer>) -> Self {
        let max_workers = capturer.config().max_workers.max(1);
        Self {
            capturer,
            semaphore: Arc::new(Semaphore::new(max_workers)),
            max_workers,
            completed: Arc::new(AtomicU64::new(0)),
            failed: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Get number of idle workers.
    pub fn available_workers(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }

    /// Capture every request and return the results in request order.
    pub async fn run(&self, requests: Vec<CaptureRequest>) -> Vec<CaptureResult> {
        info!(
            "Capturing {} pages with {} workers",
            requests.len(),
            self.max_workers
        );

        let mut handles = Vec::with_capacity(requests.len());
        for request in requests {
            let handle = self.submit(request.clone()).await;
            handles.push((request, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (request, handle) in handles {
            let result = match handle {
                Ok(handle) => finish_task(&self.failed, request, handle.await),
                Err(e) => CaptureResult { request, outcome: Err(e) },
            };
            results.push(result);
        }

        info!(
            "Capture run finished: {} ok, {} failed",
            results.iter().filter(|r| r.is_success()).count(),
            results.iter().filter(|r| !r.is_success()).count()
        );
        results
    }

    /// Process requests from a channel until it closes, sending each result
    /// back as it finishes. Returns once every started capture is done.
    pub async fn serve(
        self: Arc<Self>,
        mut requests: mpsc::Receiver<CaptureRequest>,
        results: mpsc::Sender<CaptureResult>,
    ) {
        while let Some(request) = requests.recv().await {
            let results = results.clone();
            match self.submit(request.clone()).await {
                Ok(handle) => {
                    let failed = self.failed.clone();
                    tokio::spawn(async move {
                        let result = finish_task(&failed, request, handle.await);
                        let _ = results.send(result).await;
                    });
                }
                Err(e) => {
                    let _ = results.send(CaptureResult { request, outcome: Err(e) }).await;
                }
            }
        }

        // Wait for in-flight captures by draining all permits.
        let permits = u32::try_from(self.max_workers).unwrap_or(u32::MAX);
        if let Ok(all) = self.semaphore.acquire_many(permits).await {
            drop(all);
        }
        debug!("Capture queue drained");
    }

    /// Wait for a free worker and start the capture on it.
    async fn submit(
        &self,
        request: CaptureRequest,
    ) -> Result<tokio::task::JoinHandle<CaptureResult>, CaptureError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| CaptureError::Renderer(e.to_string()))?;

        let capturer = self.capturer.clone();
        let completed = self.completed.clone();
        let failed = self.failed.clone();

        Ok(tokio::spawn(async move {
            debug!("Capturing {} for site {}", request.url, request.site_id);
            let outcome = capturer.capture(&request.site_id, &request.url).await;

            match &outcome {
                Ok(_) => {
                    completed.fetch_add(1, Ordering::SeqCst);
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::SeqCst);
                    error!("Capture of {} failed: {}", request.url, e);
                }
            }

            drop(permit);
            CaptureResult { request, outcome }
        }))
    }
}

/// Turn a finished capture task into its result. A task that panicked or was
/// cancelled still yields a failed result for its request.
fn finish_task(
    failed: &AtomicU64,
    request: CaptureRequest,
    joined: Result<CaptureResult, JoinError>,
) -> CaptureResult {
    match joined {
        Ok(result) => result,
        Err(e) => {
            error!("Capture task {} aborted: {}", request.id, e);
            failed.fetch_add(1, Ordering::SeqCst);
            CaptureResult {
                request,
                outcome: Err(CaptureError::Renderer(format!("capture task aborted: {}", e))),
            }
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
