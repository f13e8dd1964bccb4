//! Event sink trait and implementations.

use parking_lot::RwLock;
use tracing::{debug, info, Level};

use crate::core::TimelineEvent;

/// Receives timeline lifecycle events.
///
/// Called synchronously from the session, after its state lock is released
/// and in the order the events happened. Implementations must not panic and
/// should return quickly.
pub trait EventSink: Send + Sync {
    /// Handles one event.
    fn emit(&self, event: &TimelineEvent);
}

/// Discards every event. The default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn emit(&self, _event: &TimelineEvent) {}
}

/// Logs every event through `tracing` at a fixed level.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a logging sink at `level`. Anything but DEBUG logs at INFO.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub const fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl EventSink for LoggingEventSink {
    fn emit(&self, event: &TimelineEvent) {
        let payload = event.payload();
        if self.level == Level::DEBUG {
            debug!(event_type = %event.event_type, data = %payload, "Timeline event");
        } else {
            info!(event_type = %event.event_type, data = %payload, "Timeline event");
        }
    }
}

/// Keeps every event it receives, for assertions in tests.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<TimelineEvent>>,
}

impl CollectingEventSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all received events in order.
    #[must_use]
    pub fn events(&self) -> Vec<TimelineEvent> {
        self.events.read().clone()
    }

    /// Returns the number of received events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if nothing was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all received events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns events whose type starts with `type_prefix`.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<TimelineEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type.starts_with(type_prefix))
            .cloned()
            .collect()
    }
}

impl EventSink for CollectingEventSink {
    fn emit(&self, event: &TimelineEvent) {
        self.events.write().push(event.clone());
    }
}
