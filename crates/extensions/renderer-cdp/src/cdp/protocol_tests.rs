use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.navigate"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_error_response_deserialize() {
    let json = r#"{"id": 7, "error": {"code": -32000, "message": "Could not compute box model."}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(7));
    assert_eq!(resp.error.unwrap().code, -32000);
}

#[test]
fn test_dom_node_deserialize() {
    let json = r##"{
        "nodeId": 1,
        "backendNodeId": 2,
        "nodeType": 9,
        "nodeName": "#document",
        "localName": "",
        "children": [
            {"nodeId": 3, "backendNodeId": 4, "nodeType": 1, "nodeName": "HTML", "localName": "html"}
        ]
    }"##;
    let node: DomNode = serde_json::from_str(json).unwrap();
    assert_eq!(node.node_type, DOCUMENT_NODE);
    let children = node.children.unwrap();
    assert_eq!(children[0].node_type, ELEMENT_NODE);
    assert_eq!(children[0].local_name.as_deref(), Some("html"));
}

#[test]
fn test_layout_metrics_prefers_css_size() {
    let json = r#"{
        "contentSize": {"x": 0, "y": 0, "width": 2560, "height": 4000},
        "cssContentSize": {"x": 0, "y": 0, "width": 1280, "height": 2000}
    }"#;
    let metrics: LayoutMetrics = serde_json::from_str(json).unwrap();
    assert_eq!(metrics.document_size().unwrap().height, 2000.0);
}

#[test]
fn test_screenshot_format() {
    assert_eq!(serde_json::to_string(&ScreenshotFormat::Webp).unwrap(), "\"webp\"");
    assert_eq!(ScreenshotFormat::from(ImageFormat::Png), ScreenshotFormat::Png);
    assert!(!ScreenshotFormat::Png.is_lossy());
    assert!(ScreenshotFormat::Jpeg.is_lossy());
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "HeadlessChrome/126.0.6478.126",
        "Protocol-Version": "1.3",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert!(version.browser.starts_with("HeadlessChrome"));
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}
