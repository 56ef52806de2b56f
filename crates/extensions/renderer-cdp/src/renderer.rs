//! [`Renderer`] implementation over CDP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use stracked_config::Config;
use stracked_protocols::{
    BoundingBox, CaptureError, ElementHandle, ElementReadError, ImageFormat, PageHandle,
    PageRequest, PageTree, Renderer, Screenshot,
};

use crate::cdp::{CdpClient, CdpError, PageSession, ScreenshotFormat};
use crate::tree::page_tree;

/// Settings for [`CdpRenderer`].
#[derive(Debug, Clone)]
pub struct CdpRendererConfig {
    /// `http://host:port` debugging endpoint or a `ws://` browser URL.
    pub endpoint: String,
    pub screenshot_format: ImageFormat,
    /// Applies to lossy formats only.
    pub screenshot_quality: u8,
    /// Deadline for a single CDP command.
    pub call_timeout: Duration,
}

impl Default for CdpRendererConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9222".to_string(),
            screenshot_format: ImageFormat::Webp,
            screenshot_quality: 100,
            call_timeout: Duration::from_secs(30),
        }
    }
}

impl CdpRendererConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.browser.endpoint.clone(),
            screenshot_format: ImageFormat::parse(&config.capture.screenshot_format)
                .unwrap_or_default(),
            screenshot_quality: config.capture.screenshot_quality.min(100),
            call_timeout: Duration::from_secs(config.capture.page_load_timeout_secs.max(1)),
        }
    }
}

/// Renders pages in Chrome, one browser context per page.
pub struct CdpRenderer {
    client: Arc<CdpClient>,
    config: CdpRendererConfig,
}

impl CdpRenderer {
    /// Connect to the browser named by `config.endpoint`.
    pub async fn connect(config: CdpRendererConfig) -> Result<Self, CdpError> {
        let client = CdpClient::connect(&config.endpoint, config.call_timeout).await?;
        match client.version() {
            Some(v) => info!("Connected to {} at {}", v.browser, config.endpoint),
            None => info!("Connected to browser at {}", client.browser_ws_url()),
        }
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    async fn open(&self, context_id: &str, request: &PageRequest) -> Result<PageSession, CdpError> {
        let session = self.client.new_page(context_id).await?;
        session
            .set_viewport(request.viewport.width, request.viewport.height)
            .await?;
        session.navigate(&request.url).await?;
        Ok(session)
    }
}

#[async_trait]
impl Renderer for CdpRenderer {
    fn id(&self) -> &str {
        "cdp"
    }

    async fn load_page(&self, request: &PageRequest) -> Result<Box<dyn PageHandle>, CaptureError> {
        let context_id = self
            .client
            .create_context()
            .await
            .map_err(|e| CaptureError::Renderer(e.to_string()))?;

        // Disposes the context if this future is dropped or fails below.
        let guard = ContextGuard::new(self.client.clone(), context_id);

        let session = self
            .open(guard.id(), request)
            .await
            .map_err(|e| page_load_error(&request.url, e))?;

        debug!("Loaded {} in context {}", request.url, guard.id());

        Ok(Box::new(CdpPage {
            session,
            guard,
            screenshot_format: self.config.screenshot_format,
            screenshot_quality: self.config.screenshot_quality,
        }))
    }
}

fn page_load_error(url: &str, e: CdpError) -> CaptureError {
    match e {
        CdpError::NavigationFailed(reason) => CaptureError::PageLoad {
            url: url.to_string(),
            reason,
        },
        CdpError::JavaScript(reason) | CdpError::Timeout(reason) => CaptureError::PageLoad {
            url: url.to_string(),
            reason,
        },
        other => CaptureError::Renderer(other.to_string()),
    }
}

/// Owns a browser context until it is explicitly disposed.
struct ContextGuard {
    client: Arc<CdpClient>,
    context_id: Mutex<Option<String>>,
    id: String,
}

impl ContextGuard {
    fn new(client: Arc<CdpClient>, context_id: String) -> Self {
        Self {
            client,
            context_id: Mutex::new(Some(context_id.clone())),
            id: context_id,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    async fn dispose(&self) -> Result<(), CdpError> {
        let context_id = self.context_id.lock().take();
        match context_id {
            Some(id) => self.client.dispose_context(&id).await,
            None => Ok(()),
        }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let Some(id) = self.context_id.lock().take() else {
            return;
        };
        let client = self.client.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = client.dispose_context(&id).await {
                        warn!("Failed to dispose browser context {}: {}", id, e);
                    }
                });
            }
            Err(_) => warn!("Browser context {} leaked: no runtime to dispose it", id),
        }
    }
}

/// A page loaded by [`CdpRenderer`].
struct CdpPage {
    session: PageSession,
    guard: ContextGuard,
    screenshot_format: ImageFormat,
    screenshot_quality: u8,
}

#[async_trait]
impl PageHandle for CdpPage {
    async fn enumerate_elements(&self) -> Result<PageTree, CaptureError> {
        let document = self
            .session
            .get_document()
            .await
            .map_err(|e| CaptureError::Enumeration(e.to_string()))?;
        Ok(page_tree(&document))
    }

    async fn bounding_box(&self, element: ElementHandle) -> Result<BoundingBox, ElementReadError> {
        let model = self
            .session
            .get_box_model(element.0)
            .await
            .map_err(|e| ElementReadError::Backend(e.to_string()))?
            .ok_or_else(|| ElementReadError::NoLayout(format!("backend node {}", element.0)))?;

        BoundingBox::from_quad(&model.border)
    }

    async fn screenshot(&self) -> Result<Screenshot, CaptureError> {
        let data = self
            .session
            .full_page_screenshot(
                ScreenshotFormat::from(self.screenshot_format),
                Some(self.screenshot_quality),
            )
            .await
            .map_err(|e| CaptureError::Screenshot(e.to_string()))?;

        Ok(Screenshot {
            data: Bytes::from(data),
            format: self.screenshot_format,
        })
    }

    async fn close(&self) -> Result<(), CaptureError> {
        self.guard
            .dispose()
            .await
            .map_err(|e| CaptureError::Renderer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_load_error_mapping() {
        let err = page_load_error(
            "http://localhost:4000",
            CdpError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".to_string()),
        );
        assert!(matches!(err, CaptureError::PageLoad { ref reason, .. } if reason.contains("NAME_NOT_RESOLVED")));

        let err = page_load_error("http://localhost:4000", CdpError::SessionClosed);
        assert!(matches!(err, CaptureError::Renderer(_)));
    }

    #[test]
    fn test_config_from_app_config() {
        let mut app = Config::default();
        app.capture.screenshot_format = "jpg".to_string();
        app.capture.screenshot_quality = 80;

        let config = CdpRendererConfig::from_config(&app);
        assert_eq!(config.endpoint, "http://localhost:9222");
        assert_eq!(config.screenshot_format, ImageFormat::Jpeg);
        assert_eq!(config.screenshot_quality, 80);
    }

    #[test]
    fn test_default_config() {
        let config = CdpRendererConfig::default();
        assert_eq!(config.screenshot_format, ImageFormat::Webp);
        assert_eq!(config.screenshot_quality, 100);
    }
}
