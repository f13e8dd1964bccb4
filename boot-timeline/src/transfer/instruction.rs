//! Declarative transfer instructions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::core::{anchor_key, OriginKind, SourceLocation};

/// A place on screen a transfer visual starts from or lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorKind {
    /// The ESP partition file list.
    EspPartition,
    /// The Windows partition file list.
    WindowsPartition,
    /// The RAM panel.
    ResidentArea,
}

impl AnchorKind {
    /// Maps a stage source location to the anchor transfers start from.
    ///
    /// Returns `None` when nothing moves from disk.
    #[must_use]
    pub const fn source_for(location: SourceLocation) -> Option<Self> {
        match location {
            SourceLocation::Esp => Some(Self::EspPartition),
            SourceLocation::Windows => Some(Self::WindowsPartition),
            SourceLocation::None | SourceLocation::Resident => None,
        }
    }

    /// Returns the partition whose library chips act as anchor candidates.
    #[must_use]
    pub const fn partition(self) -> Option<SourceLocation> {
        match self {
            Self::EspPartition => Some(SourceLocation::Esp),
            Self::WindowsPartition => Some(SourceLocation::Windows),
            Self::ResidentArea => None,
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EspPartition => write!(f, "esp-partition"),
            Self::WindowsPartition => write!(f, "windows-partition"),
            Self::ResidentArea => write!(f, "resident-area"),
        }
    }
}

/// One artifact's visual move from a source anchor to the RAM panel.
///
/// `delay_ms` is a begin-after offset from the stage transition. Sinks run
/// instructions concurrently; they never wait for one another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInstruction {
    /// Label of the artifact being moved.
    pub artifact_label: String,
    /// The artifact's own origin.
    pub origin: OriginKind,
    /// Where the visual starts.
    pub source_anchor: AnchorKind,
    /// Where the visual lands. Always [`AnchorKind::ResidentArea`].
    pub destination_anchor: AnchorKind,
    /// Offset from the transition before the visual begins.
    pub delay_ms: u64,
    /// How long the visual lives.
    pub duration_ms: u64,
}

impl TransferInstruction {
    /// Returns the delay as a Duration.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Returns the lifetime as a Duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Returns the key used to look up the source chip.
    #[must_use]
    pub fn anchor_key(&self) -> String {
        anchor_key(&self.artifact_label)
    }
}
