//! Capture requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One page to capture for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Unique request ID.
    pub id: Uuid,
    /// Site the snapshot belongs to.
    pub site_id: String,
    /// Page to load.
    pub url: String,
    /// When the request was queued.
    pub created_at: DateTime<Utc>,
}

impl CaptureRequest {
    pub fn new(site_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            site_id: site_id.into(),
            url: url.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_new() {
        let request = CaptureRequest::new("site", "http://localhost:4000");
        assert_eq!(request.site_id, "site");
        assert_eq!(request.url, "http://localhost:4000");
        assert_ne!(request.id, CaptureRequest::new("site", "x").id);
    }
}
