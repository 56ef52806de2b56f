//! Event sources: in-memory and JSON-lines files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use stracked_protocols::{EventSource, EventSourceError, InteractionEvent, RawEvent};

/// In-memory event source.
#[derive(Default)]
pub struct MemoryEventSource {
    events: RwLock<Vec<InteractionEvent>>,
}

impl MemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source pre-filled with events.
    pub fn with_events(events: Vec<InteractionEvent>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// Record one more event.
    pub async fn push(&self, event: InteractionEvent) {
        self.events.write().await.push(event);
    }
}

#[async_trait]
impl EventSource for MemoryEventSource {
    async fn query_events(&self, site_id: &str) -> Result<Vec<InteractionEvent>, EventSourceError> {
        let events = self.events.read().await;
        Ok(events.iter().filter(|e| e.site_id == site_id).cloned().collect())
    }
}

/// One line of an events file: the ingestion envelope around a raw payload.
///
/// ```json
/// {"site_id":"...","visitor_id":"...","timestamp":"2024-05-01T10:00:00Z",
///  "type":"click","data":{"xpath":"/html/body","relativeXPercentage":50,"relativeYPercentage":50}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    pub site_id: String,
    pub visitor_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: RawEvent,
}

impl From<StoredEvent> for InteractionEvent {
    fn from(stored: StoredEvent) -> Self {
        stored
            .payload
            .into_event(stored.site_id, stored.visitor_id, stored.timestamp)
    }
}

/// Event source backed by a JSON-lines file of [`StoredEvent`]s.
///
/// Malformed lines are logged and skipped.
pub struct JsonlEventSource {
    path: PathBuf,
}

impl JsonlEventSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_lines(&self, content: &str, site_id: &str) -> Vec<InteractionEvent> {
        let mut events = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<StoredEvent>(line) {
                Ok(stored) if stored.site_id == site_id => events.push(stored.into()),
                Ok(_) => {}
                Err(e) => warn!("Skipping malformed event at {:?}:{}: {}", self.path, index + 1, e),
            }
        }

        events
    }
}

#[async_trait]
impl EventSource for JsonlEventSource {
    async fn query_events(&self, site_id: &str) -> Result<Vec<InteractionEvent>, EventSourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let events = self.parse_lines(&content, site_id);
        debug!("Read {} events for site {} from {:?}", events.len(), site_id, self.path);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LINE_A: &str = r#"{"site_id":"a","visitor_id":"v1","timestamp":"2024-05-01T10:00:00Z","type":"click","data":{"xpath":"/html/body","relativeXPercentage":50,"relativeYPercentage":25}}"#;
    const LINE_B: &str = r#"{"site_id":"b","visitor_id":"v2","timestamp":"2024-05-01T10:00:01Z","type":"scroll","data":{"xpath":"/html","relativeXPercentage":0,"relativeYPercentage":0}}"#;
    const LINE_A2: &str = r#"{"site_id":"a","visitor_id":"v1","timestamp":"2024-05-01T10:00:02Z","type":"mousemove","data":{"xpath":"/html/body/div","relativeXPercentage":1,"relativeYPercentage":2}}"#;

    #[tokio::test]
    async fn test_memory_source_filters_by_site() {
        let source = MemoryEventSource::new();
        source.push(InteractionEvent::new("a", "v", "/html", 1.0, 1.0, "click")).await;
        source.push(InteractionEvent::new("b", "v", "/html", 1.0, 1.0, "click")).await;
        source.push(InteractionEvent::new("a", "v", "/html/body", 1.0, 1.0, "scroll")).await;

        let events = source.query_events("a").await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].selector.as_str(), "/html/body");
    }

    #[tokio::test]
    async fn test_jsonl_source_reads_site_events_in_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", LINE_A).unwrap();
        writeln!(file, "{}", LINE_B).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{}", LINE_A2).unwrap();

        let source = JsonlEventSource::new(file.path());
        let events = source.query_events("a").await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].selector.as_str(), "/html/body");
        assert_eq!(events[0].relative_y, 25.0);
        assert_eq!(events[0].event_type.as_str(), "click");
        assert_eq!(events[1].event_type.as_str(), "mousemove");
    }

    #[tokio::test]
    async fn test_jsonl_source_skips_malformed_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file, r#"{{"site_id":"a"}}"#).unwrap();
        writeln!(file, "{}", LINE_A).unwrap();

        let source = JsonlEventSource::new(file.path());
        let events = source.query_events("a").await.unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_jsonl_source_missing_file() {
        let source = JsonlEventSource::new("/nonexistent/events.jsonl");
        let result = source.query_events("a").await;
        assert!(matches!(result, Err(EventSourceError::Io(_))));
    }
}
