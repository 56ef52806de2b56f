//! Navigation operations for CDP page session.

use std::time::Duration;

use serde_json::json;
use tracing::debug;
use url::Url;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const READY_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to `url` and wait until the document has finished loading.
    ///
    /// Returns the frame ID. Has no deadline of its own; callers bound it.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let url = Url::parse(url)
            .map_err(|e| CdpError::NavigationFailed(format!("{}: {}", url, e)))?;

        let result = self
            .call("Page.navigate", Some(json!({"url": url.as_str()})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll `document.readyState` until the load event has fired.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        loop {
            let state = self.evaluate("document.readyState").await?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }
            tokio::time::sleep(READY_POLL).await;
        }
    }
}
