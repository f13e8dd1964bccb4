//! Timing configuration for a timeline session.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{Result, TimelineError};

/// Configuration for transfer staggering and auto-play pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Delay added per position within a stage's delta, in milliseconds.
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
    /// Auto-play advance interval, in milliseconds.
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,
    /// How long a transfer visual lives before the sink retires it.
    #[serde(default = "default_transfer_duration_ms")]
    pub transfer_duration_ms: u64,
}

const fn default_stagger_ms() -> u64 {
    120
}

const fn default_autoplay_interval_ms() -> u64 {
    1500
}

const fn default_transfer_duration_ms() -> u64 {
    900
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            stagger_ms: default_stagger_ms(),
            autoplay_interval_ms: default_autoplay_interval_ms(),
            transfer_duration_ms: default_transfer_duration_ms(),
        }
    }
}

impl TimelineConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the per-item stagger.
    #[must_use]
    pub const fn with_stagger_ms(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    /// Sets the auto-play interval.
    #[must_use]
    pub const fn with_autoplay_interval_ms(mut self, interval_ms: u64) -> Self {
        self.autoplay_interval_ms = interval_ms;
        self
    }

    /// Sets the transfer visual lifetime.
    #[must_use]
    pub const fn with_transfer_duration_ms(mut self, duration_ms: u64) -> Self {
        self.transfer_duration_ms = duration_ms;
        self
    }

    /// Checks the configuration. A zero stagger is allowed.
    pub fn validate(&self) -> Result<()> {
        if self.autoplay_interval_ms == 0 {
            return Err(TimelineError::Config(
                "autoplay_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.transfer_duration_ms == 0 {
            return Err(TimelineError::Config(
                "transfer_duration_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Gets the auto-play interval as a Duration.
    #[must_use]
    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}
