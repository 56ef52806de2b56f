//! Recorded visitor interactions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::selector::Selector;

/// Event type string as reported by the tracking script (`click`, `mousemove`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(String);

impl EventType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Click-class events: any type whose name contains `click`.
    pub fn is_click_class(&self) -> bool {
        self.0.contains("click")
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single visitor action referencing an element and a position inside it.
///
/// `relative_x`/`relative_y` are percentages of the element's box, in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub site_id: String,
    pub visitor_id: String,
    pub selector: Selector,
    pub relative_x: f64,
    pub relative_y: f64,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
}

impl InteractionEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        site_id: impl Into<String>,
        visitor_id: impl Into<String>,
        selector: impl Into<Selector>,
        relative_x: f64,
        relative_y: f64,
        event_type: impl Into<EventType>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            visitor_id: visitor_id.into(),
            selector: selector.into(),
            relative_x,
            relative_y,
            event_type: event_type.into(),
            timestamp: Utc::now(),
        }
    }

    /// Set the event timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Both relative coordinates are finite and within `[0, 100]`.
    pub fn has_valid_position(&self) -> bool {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        in_range(self.relative_x) && in_range(self.relative_y)
    }
}

/// Event payload as sent by the tracking script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: RawEventData,
}

/// Position payload of a [`RawEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventData {
    pub xpath: String,
    pub relative_x_percentage: f64,
    pub relative_y_percentage: f64,
}

impl RawEvent {
    /// Attach the envelope fields the ingestion layer resolved for this payload.
    pub fn into_event(
        self,
        site_id: impl Into<String>,
        visitor_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> InteractionEvent {
        InteractionEvent {
            site_id: site_id.into(),
            visitor_id: visitor_id.into(),
            selector: Selector::new(self.data.xpath),
            relative_x: self.data.relative_x_percentage,
            relative_y: self.data.relative_y_percentage,
            event_type: EventType::new(self.event_type),
            timestamp,
        }
    }
}
