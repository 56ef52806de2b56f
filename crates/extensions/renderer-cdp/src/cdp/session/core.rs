//! Core session struct and CDP command dispatch.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::client::Connection;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::{Clip, LayoutMetrics, ScreenshotFormat};

/// A session attached to a single page/target.
pub struct PageSession {
    pub(super) target_id: String,
    pub(super) session_id: String,
    pub(super) conn: Arc<Connection>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, conn: Arc<Connection>) -> Self {
        Self {
            target_id,
            session_id,
            conn,
        }
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.conn.call(method, params, Some(&self.session_id)).await
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Fix the layout viewport to `width` x `height` CSS pixels.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(json!({
                "width": width,
                "height": height,
                "deviceScaleFactor": 1,
                "mobile": false,
            })),
        )
        .await?;
        Ok(())
    }

    /// Document and viewport sizes.
    pub async fn layout_metrics(&self) -> Result<LayoutMetrics, CdpError> {
        let result = self.call("Page.getLayoutMetrics", None).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Take a screenshot and return the decoded image bytes.
    pub async fn screenshot(
        &self,
        format: ScreenshotFormat,
        quality: Option<u8>,
        full_page: bool,
        clip: Option<Clip>,
    ) -> Result<Vec<u8>, CdpError> {
        let mut params = json!({
            "format": format,
            "captureBeyondViewport": full_page,
        });

        if let Some(q) = quality.filter(|_| format.is_lossy()) {
            params["quality"] = json!(q);
        }

        if let Some(c) = clip {
            params["clip"] = serde_json::to_value(c)?;
        }

        let result = self.call("Page.captureScreenshot", Some(params)).await?;

        let data = result["data"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing screenshot data".to_string()))?;

        Ok(STANDARD.decode(data)?)
    }

    /// Screenshot of the whole document, not just the viewport.
    pub async fn full_page_screenshot(
        &self,
        format: ScreenshotFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, CdpError> {
        let metrics = self.layout_metrics().await?;
        let clip = metrics.document_size().map(full_page_clip);
        self.screenshot(format, quality, true, clip).await
    }
}

/// Clip covering the whole document at scale 1.
pub(super) fn full_page_clip(size: crate::cdp::protocol::Rect) -> Clip {
    Clip {
        x: 0.0,
        y: 0.0,
        width: size.width.ceil(),
        height: size.height.ceil(),
        scale: 1.0,
    }
}
