//! Event sinks for timeline observability.
//!
//! A session reports lifecycle events (stage entered, auto-play started and
//! stopped, resets, inspection fallbacks) to the sink it was built with.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
