//! The view model delivered to presentation sinks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{ArtifactTransfer, SourceLocation, Stage};
use crate::indicators::IndicatorState;
use crate::transfer::TransferInstruction;

/// Message the RAM panel shows while nothing is resident.
pub const EMPTY_RESIDENT_MESSAGE: &str = "Nothing loaded into RAM yet (still very early).";

/// Everything a sink needs to render one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    /// Session that produced this view.
    pub session_id: Uuid,
    /// Transition counter; later views carry higher revisions.
    pub revision: u64,
    /// Current stage index.
    pub stage_index: usize,
    /// Number of stages in the catalog.
    pub stage_count: usize,
    /// The current stage.
    pub stage: Stage,
    /// Indicator lights and control badge.
    pub indicators: IndicatorState,
    /// Resident artifacts in first-insertion order.
    pub resident: Vec<ArtifactTransfer>,
    /// Transfers to animate for this transition only.
    pub transfers: Vec<TransferInstruction>,
    /// Disk panel focus.
    pub focus: SourceLocation,
    /// Whether auto-play is running after this transition.
    pub autoplay_active: bool,
}

impl ViewModel {
    /// `"Step {n}/{total}"`, 1-based.
    #[must_use]
    pub fn step_label(&self) -> String {
        format!("Step {}/{}", self.stage_index + 1, self.stage_count)
    }

    /// `"Layer: {layer}"`.
    #[must_use]
    pub fn layer_label(&self) -> String {
        format!("Layer: {}", self.stage.layer_name)
    }

    /// Disk panel focus label.
    #[must_use]
    pub const fn focus_label(&self) -> &'static str {
        self.focus.focus_label()
    }

    /// Stage heading.
    #[must_use]
    pub fn heading(&self) -> String {
        self.stage.heading()
    }

    /// Whether "previous" is enabled.
    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.stage_index > 0
    }

    /// Whether "next" is enabled.
    #[must_use]
    pub const fn can_go_next(&self) -> bool {
        self.stage_index + 1 < self.stage_count
    }

    /// Placeholder text for an empty RAM panel.
    #[must_use]
    pub fn empty_resident_message(&self) -> Option<&'static str> {
        self.resident.is_empty().then_some(EMPTY_RESIDENT_MESSAGE)
    }
}
