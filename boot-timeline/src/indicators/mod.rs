//! Indicator derivation: security lights and the control badge.

use serde::{Deserialize, Serialize};

use crate::core::{Controller, Stage};

/// Badge shown when a stage names no controller.
pub const UNKNOWN_CONTROLLER_ICON: &str = "➡️";
/// Name shown when a stage names no controller.
pub const UNKNOWN_CONTROLLER_NAME: &str = "Unknown";

/// Indicator lights and control badge for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorState {
    /// Secure Boot light.
    pub secure_boot: bool,
    /// TPM light.
    pub tpm: bool,
    /// Who has control now.
    pub controller: Controller,
}

/// Projects a stage onto its indicator state.
#[must_use]
pub fn derive(stage: &Stage) -> IndicatorState {
    let controller = stage.controller.clone().map_or_else(
        || Controller::new(UNKNOWN_CONTROLLER_ICON, UNKNOWN_CONTROLLER_NAME),
        |c| Controller {
            icon: if c.icon.is_empty() {
                UNKNOWN_CONTROLLER_ICON.to_string()
            } else {
                c.icon
            },
            name: if c.name.is_empty() {
                UNKNOWN_CONTROLLER_NAME.to_string()
            } else {
                c.name
            },
        },
    );

    IndicatorState {
        secure_boot: stage.secure_boot,
        tpm: stage.tpm,
        controller,
    }
}
