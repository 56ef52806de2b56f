//! In-process renderer double serving a fixed page.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use stracked_protocols::{
    BoundingBox, CaptureError, ElementHandle, ElementReadError, ImageFormat, PageHandle,
    PageRequest, PageTree, Renderer, Screenshot,
};

pub const IMAGE: &[u8] = b"RIFF\x00\x00\x00\x00WEBPVP8 ";

/// Counters shared between a renderer and its pages.
#[derive(Debug, Default)]
pub struct Activity {
    pub loads: AtomicUsize,
    pub open: AtomicUsize,
    pub peak_open: AtomicUsize,
    pub closed: AtomicUsize,
}

pub struct FakeRenderer {
    pub activity: Arc<Activity>,
    load_delay: Duration,
    fail_screenshot: bool,
    failing_urls: HashSet<String>,
    panic_on_load: bool,
    duplicate_root: bool,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self {
            activity: Arc::new(Activity::default()),
            load_delay: Duration::ZERO,
            fail_screenshot: false,
            failing_urls: HashSet::new(),
            panic_on_load: false,
            duplicate_root: false,
        }
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn with_failing_screenshot(mut self) -> Self {
        self.fail_screenshot = true;
        self
    }

    pub fn with_failing_url(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }

    pub fn with_panicking_load(mut self) -> Self {
        self.panic_on_load = true;
        self
    }

    /// Append a second parentless `html` element, so two elements share the
    /// selector `/html`.
    pub fn with_duplicate_root(mut self) -> Self {
        self.duplicate_root = true;
        self
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    fn id(&self) -> &str {
        "fake"
    }

    async fn load_page(&self, request: &PageRequest) -> Result<Box<dyn PageHandle>, CaptureError> {
        self.activity.loads.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_load {
            panic!("renderer crashed loading {}", request.url);
        }
        if self.failing_urls.contains(&request.url) {
            return Err(CaptureError::PageLoad {
                url: request.url.clone(),
                reason: "net::ERR_CONNECTION_REFUSED".to_string(),
            });
        }

        let open = self.activity.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.activity.peak_open.fetch_max(open, Ordering::SeqCst);

        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }

        Ok(Box::new(FakePage::new(
            self.activity.clone(),
            self.fail_screenshot,
            self.duplicate_root,
        )))
    }
}

/// Page layout:
///
/// ```text
/// html
///   head          (no box)
///   body
///     div
///     div
///       button
///     span        (inverted box)
/// html            (only with a duplicate root)
/// ```
pub struct FakePage {
    activity: Arc<Activity>,
    fail_screenshot: bool,
    tree: PageTree,
    boxes: HashMap<i64, BoundingBox>,
}

impl FakePage {
    fn new(activity: Arc<Activity>, fail_screenshot: bool, duplicate_root: bool) -> Self {
        let mut tree = PageTree::new();
        let html = tree.push_root("html", ElementHandle(1));
        tree.push_child(html, "head", ElementHandle(2)).unwrap();
        let body = tree.push_child(html, "body", ElementHandle(3)).unwrap();
        tree.push_child(body, "div", ElementHandle(4)).unwrap();
        let second = tree.push_child(body, "div", ElementHandle(5)).unwrap();
        tree.push_child(second, "button", ElementHandle(6)).unwrap();
        tree.push_child(body, "span", ElementHandle(7)).unwrap();
        if duplicate_root {
            tree.push_root("html", ElementHandle(8));
        }

        let mut boxes = HashMap::new();
        boxes.insert(1, BoundingBox::new(0.0, 0.0, 900.0, 1280.0).unwrap());
        boxes.insert(3, BoundingBox::new(8.0, 8.0, 892.0, 1272.0).unwrap());
        boxes.insert(4, BoundingBox::new(8.0, 8.0, 40.0, 1272.0).unwrap());
        boxes.insert(5, BoundingBox::new(40.0, 8.0, 400.0, 1272.0).unwrap());
        boxes.insert(6, BoundingBox::new(100.0, 50.0, 140.0, 150.0).unwrap());
        boxes.insert(
            7,
            BoundingBox {
                top: 500.0,
                left: 0.0,
                bottom: 450.0,
                right: 10.0,
            },
        );
        boxes.insert(8, BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap());

        Self {
            activity,
            fail_screenshot,
            tree,
            boxes,
        }
    }
}

#[async_trait]
impl PageHandle for FakePage {
    async fn enumerate_elements(&self) -> Result<PageTree, CaptureError> {
        Ok(self.tree.clone())
    }

    async fn bounding_box(&self, element: ElementHandle) -> Result<BoundingBox, ElementReadError> {
        self.boxes
            .get(&element.0)
            .copied()
            .ok_or_else(|| ElementReadError::NoLayout(format!("node {}", element.0)))
    }

    async fn screenshot(&self) -> Result<Screenshot, CaptureError> {
        if self.fail_screenshot {
            return Err(CaptureError::Screenshot("target crashed".to_string()));
        }
        Ok(Screenshot {
            data: Bytes::from_static(IMAGE),
            format: ImageFormat::Webp,
        })
    }

    async fn close(&self) -> Result<(), CaptureError> {
        self.activity.open.fetch_sub(1, Ordering::SeqCst);
        self.activity.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
