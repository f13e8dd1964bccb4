//! Navigation: the session controller and its auto-play timer.
//!
//! This module provides:
//! - `TimelineController`, which owns the stage index and resident set
//! - Bounded jump/next/previous/refresh/reset transitions
//! - A cancelable auto-play timer on the ambient tokio runtime

mod autoplay;
mod controller;
#[cfg(test)]
mod controller_tests;
mod state;

pub use autoplay::MIN_INTERVAL;
pub use controller::{TimelineController, TimelineControllerBuilder};
pub use state::{NavigationState, TransitionCause};
