//! Testing utilities for timeline sessions.
//!
//! This module provides:
//! - Small catalogs for scenario tests
//! - A session harness wired to collecting sinks
//! - A recording dialog host

mod fixtures;

pub use fixtures::{linear_catalog, two_stage_catalog, RecordingDialog, TestTimeline};
