//! Error types for the boot timeline.
//!
//! Runtime navigation never fails: out-of-range indices are clamped, unknown
//! inspection keys fall back to a generic description, and unresolvable
//! transfer anchors fall back to the first candidate. The errors below are
//! raised only while building a catalog, loading configuration, or wiring
//! auto-play into a host without a runtime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for boot timeline operations.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The stage catalog failed validation.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Auto-play was requested outside of a tokio runtime.
    #[error("Auto-play requires a tokio runtime")]
    NoRuntime,
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error raised when a stage catalog fails validation.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct CatalogError {
    /// The error message.
    pub message: String,
    /// The stage indices involved in the error.
    pub stages: Vec<usize>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl CatalogError {
    /// Creates a new catalog error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
            context: HashMap::new(),
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<usize>) -> Self {
        self.stages = stages;
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Creates the error raised for a catalog without stages.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("Stage catalog must contain at least one stage")
    }

    /// Creates the error raised when a stage declares the same artifact twice.
    #[must_use]
    pub fn duplicate_label(stage: usize, label: &str) -> Self {
        Self::new(format!(
            "Stage {stage} declares artifact '{label}' more than once"
        ))
        .with_stages(vec![stage])
        .with_context_entry("label", label)
    }

    /// Creates the error raised for an artifact with a blank label.
    #[must_use]
    pub fn blank_label(stage: usize) -> Self {
        Self::new(format!("Stage {stage} declares an artifact with an empty label"))
            .with_stages(vec![stage])
    }
}

/// Convenient result alias.
pub type Result<T> = std::result::Result<T, TimelineError>;
