//! Capturer configuration.

use std::time::Duration;

use stracked_config::Config;
use stracked_protocols::Viewport;

/// Runtime settings for the capturer and its pool.
#[derive(Debug, Clone)]
pub struct CapturerConfig {
    /// Viewport every page is rendered into.
    pub viewport: Viewport,
    /// Upper bound on page load; exceeding it cancels the capture.
    pub page_load_timeout: Duration,
    /// Delay after load before layout is read.
    pub settle: Duration,
    /// Maximum number of simultaneous page loads.
    pub max_workers: usize,
}

impl Default for CapturerConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            page_load_timeout: Duration::from_secs(30),
            settle: Duration::from_millis(500),
            max_workers: 4,
        }
    }
}

impl CapturerConfig {
    /// Build from the loaded application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            viewport: Viewport {
                width: config.browser.viewport_width,
                height: config.browser.viewport_height,
            },
            page_load_timeout: Duration::from_secs(config.capture.page_load_timeout_secs),
            settle: Duration::from_millis(config.capture.settle_ms),
            max_workers: config.capture.max_workers.max(1) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let config = CapturerConfig::from_config(&Config::default());
        assert_eq!(config.viewport, Viewport { width: 1280, height: 720 });
        assert_eq!(config.page_load_timeout, Duration::from_secs(30));
        assert_eq!(config.settle, Duration::from_millis(500));
        assert_eq!(config.max_workers, 4);
    }

    #[test]
    fn test_zero_workers_clamped() {
        let mut app = Config::default();
        app.capture.max_workers = 0;

        let config = CapturerConfig::from_config(&app);
        assert_eq!(config.max_workers, 1);
    }
}
