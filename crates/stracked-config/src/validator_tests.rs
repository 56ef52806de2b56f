use super::*;

#[test]
fn test_default_config_is_valid() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_zero_workers() {
    let mut config = Config::default();
    config.capture.max_workers = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "capture.max_workers"));
}

#[test]
fn test_many_workers_warns() {
    let mut config = Config::default();
    config.capture.max_workers = 32;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_zero_viewport() {
    let mut config = Config::default();
    config.browser.viewport_height = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.viewport"));
}

#[test]
fn test_zero_timeout() {
    let mut config = Config::default();
    config.capture.page_load_timeout_secs = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_bad_endpoint_scheme() {
    let mut config = Config::default();
    config.browser.endpoint = "ftp://localhost:9222".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_endpoint_schemes_accepted() {
    for endpoint in [
        "http://localhost:9222",
        "https://chrome.internal:9222",
        "ws://localhost:9222/devtools/browser/abc",
        "wss://chrome.internal/devtools/browser/abc",
    ] {
        let mut config = Config::default();
        config.browser.endpoint = endpoint.to_string();

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid(), "{} rejected: {:?}", endpoint, result.errors);
    }
}

#[test]
fn test_quality_and_format() {
    let mut config = Config::default();
    config.capture.screenshot_quality = 101;
    config.capture.screenshot_format = "gif".to_string();

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_into_result_reports_first_error() {
    let mut config = Config::default();
    config.capture.max_workers = 0;
    config.storage.database_path = String::new();

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_into_result_passes_warnings_through() {
    let mut config = Config::default();
    config.capture.max_workers = 32;

    let warnings = ConfigValidator::validate(&config).into_result().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, "capture.max_workers");
}
