//! Staggered transfer scheduling.

use tracing::debug;

use super::instruction::{AnchorKind, TransferInstruction};
use crate::config::TimelineConfig;
use crate::core::{ArtifactTransfer, Stage};

/// Turns a stage's delta into staggered transfer instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferScheduler {
    stagger_ms: u64,
    duration_ms: u64,
}

impl Default for TransferScheduler {
    fn default() -> Self {
        Self::from_config(&TimelineConfig::default())
    }
}

impl TransferScheduler {
    /// Creates a scheduler with an explicit stagger and visual lifetime.
    #[must_use]
    pub const fn new(stagger_ms: u64, duration_ms: u64) -> Self {
        Self {
            stagger_ms,
            duration_ms,
        }
    }

    /// Creates a scheduler from session configuration.
    #[must_use]
    pub const fn from_config(config: &TimelineConfig) -> Self {
        Self::new(config.stagger_ms, config.transfer_duration_ms)
    }

    /// Returns the per-item stagger.
    #[must_use]
    pub const fn stagger_ms(&self) -> u64 {
        self.stagger_ms
    }

    /// Schedules the delta introduced by `stage`.
    ///
    /// Returns an empty list when the delta is empty or the stage's source
    /// location has no disk anchor.
    #[must_use]
    pub fn schedule(&self, stage: &Stage, delta: &[ArtifactTransfer]) -> Vec<TransferInstruction> {
        let Some(source_anchor) = AnchorKind::source_for(stage.source_location) else {
            return Vec::new();
        };

        let instructions: Vec<TransferInstruction> = delta
            .iter()
            .zip(0u64..)
            .map(|(artifact, position)| TransferInstruction {
                artifact_label: artifact.label.clone(),
                origin: artifact.origin,
                source_anchor,
                destination_anchor: AnchorKind::ResidentArea,
                delay_ms: self.stagger_ms.saturating_mul(position),
                duration_ms: self.duration_ms,
            })
            .collect();

        if !instructions.is_empty() {
            debug!(
                stage = stage.index,
                source = %source_anchor,
                count = instructions.len(),
                "Transfers scheduled"
            );
        }

        instructions
    }
}
