//! Timeline event type for lifecycle notifications.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Event type emitted when a stage is entered (including refreshes).
pub const STAGE_ENTERED: &str = "timeline.stage.entered";
/// Event type emitted when auto-play starts or restarts.
pub const AUTOPLAY_STARTED: &str = "timeline.autoplay.started";
/// Event type emitted when auto-play stops for any reason.
pub const AUTOPLAY_STOPPED: &str = "timeline.autoplay.stopped";
/// Event type emitted when the resident set is cleared.
pub const RESIDENT_RESET: &str = "timeline.resident.reset";
/// Event type emitted when an inspection falls back to the generic answer.
pub const INSPECT_FALLBACK: &str = "timeline.inspect.fallback";

/// An event emitted by a timeline session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// The event type (e.g., "timeline.stage.entered").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl TimelineEvent {
    /// Creates a new event for a session.
    #[must_use]
    pub fn new(event_type: impl Into<String>, session_id: Uuid) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: crate::utils::iso_timestamp(),
            data: HashMap::new(),
        }
        .add_data("session_id", serde_json::json!(session_id.to_string()))
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Converts the payload into a JSON object for an event sink.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        let mut map: serde_json::Map<String, serde_json::Value> =
            self.data.clone().into_iter().collect();
        map.insert("timestamp".to_string(), serde_json::json!(self.timestamp));
        serde_json::Value::Object(map)
    }

    /// Creates a "timeline.stage.entered" event.
    #[must_use]
    pub fn stage_entered(session_id: Uuid, index: usize, title: &str, delta: usize) -> Self {
        Self::new(STAGE_ENTERED, session_id)
            .add_data("stage_index", serde_json::json!(index))
            .add_data("stage", serde_json::json!(title))
            .add_data("delta", serde_json::json!(delta))
    }

    /// Creates a "timeline.autoplay.started" event.
    #[must_use]
    pub fn autoplay_started(session_id: Uuid, interval_ms: u64) -> Self {
        Self::new(AUTOPLAY_STARTED, session_id)
            .add_data("interval_ms", serde_json::json!(interval_ms))
    }

    /// Creates a "timeline.autoplay.stopped" event.
    #[must_use]
    pub fn autoplay_stopped(session_id: Uuid, reason: &str) -> Self {
        Self::new(AUTOPLAY_STOPPED, session_id).add_data("reason", serde_json::json!(reason))
    }

    /// Creates a "timeline.resident.reset" event.
    #[must_use]
    pub fn resident_reset(session_id: Uuid, cleared: usize) -> Self {
        Self::new(RESIDENT_RESET, session_id).add_data("cleared", serde_json::json!(cleared))
    }

    /// Creates a "timeline.inspect.fallback" event.
    #[must_use]
    pub fn inspect_fallback(session_id: Uuid, key: &str) -> Self {
        Self::new(INSPECT_FALLBACK, session_id).add_data("key", serde_json::json!(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_entered() {
        let id = Uuid::new_v4();
        let event = TimelineEvent::stage_entered(id, 2, "Windows Boot Manager", 1);
        assert_eq!(event.event_type, STAGE_ENTERED);
        assert_eq!(event.data.get("stage_index"), Some(&serde_json::json!(2)));
        assert_eq!(event.data.get("delta"), Some(&serde_json::json!(1)));
        assert_eq!(
            event.data.get("session_id"),
            Some(&serde_json::json!(id.to_string()))
        );
    }

    #[test]
    fn test_payload_includes_timestamp() {
        let event = TimelineEvent::autoplay_stopped(Uuid::new_v4(), "user");
        let payload = event.payload();
        assert_eq!(payload["reason"], serde_json::json!("user"));
        assert!(payload["timestamp"].as_str().is_some_and(|t| t.contains('T')));
    }
}
