//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fail on the first error, otherwise hand back the warnings.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error.into()),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(error: ValidationError) -> Self {
        ConfigError::InvalidValue {
            field: error.path,
            message: error.message,
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// DevTools discovery over HTTP, or a browser WebSocket URL.
const ENDPOINT_SCHEMES: [&str; 4] = ["http://", "https://", "ws://", "wss://"];

const SCREENSHOT_FORMATS: [&str; 4] = ["webp", "png", "jpeg", "jpg"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_capture(config, &mut result);

        if config.storage.database_path.trim().is_empty() {
            result.add_error(ValidationError::new(
                "storage.database_path",
                "database_path cannot be empty",
            ));
        }

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.endpoint.is_empty() {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "Endpoint cannot be empty",
            ));
        } else if !ENDPOINT_SCHEMES
            .iter()
            .any(|scheme| config.browser.endpoint.starts_with(scheme))
        {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "Endpoint must be an http(s) or ws(s) URL",
            ));
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport width and height must be greater than 0",
            ));
        }
    }

    fn validate_capture(config: &Config, result: &mut ValidationResult) {
        let capture = &config.capture;

        if capture.max_workers == 0 {
            result.add_error(ValidationError::new(
                "capture.max_workers",
                "max_workers must be greater than 0",
            ));
        }

        if capture.max_workers > 16 {
            result.add_warning(ValidationWarning::new(
                "capture.max_workers",
                "max_workers is very high (>16), concurrent renders may exhaust memory",
            ));
        }

        if capture.page_load_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "capture.page_load_timeout_secs",
                "page_load_timeout_secs must be greater than 0",
            ));
        }

        if !SCREENSHOT_FORMATS.contains(&capture.screenshot_format.as_str()) {
            result.add_error(ValidationError::new(
                "capture.screenshot_format",
                format!("Unknown format '{}'", capture.screenshot_format),
            ));
        }

        if capture.screenshot_quality > 100 {
            result.add_error(ValidationError::new(
                "capture.screenshot_quality",
                "screenshot_quality must be at most 100",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
