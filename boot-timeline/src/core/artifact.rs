//! Artifacts that move into memory, and the static disk library.

use serde::{Deserialize, Serialize};

use super::location::{LocationMeta, OriginKind, SourceLocation};

/// An artifact introduced into memory by a stage.
///
/// The `label` is the artifact's identity: once an artifact with a given
/// label is resident, later stages introducing the same label are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactTransfer {
    /// Unique identity within the resident set.
    pub label: String,

    /// Where this particular artifact comes from.
    #[serde(alias = "source")]
    pub origin: OriginKind,

    /// Explanatory text shown on inspection.
    #[serde(default)]
    pub note: String,

    /// Provenance shown on inspection.
    #[serde(default, alias = "where", skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationMeta>,
}

impl ArtifactTransfer {
    /// Creates a new artifact transfer.
    #[must_use]
    pub fn new(label: impl Into<String>, origin: OriginKind, note: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            origin,
            note: note.into(),
            location: None,
        }
    }

    /// Sets the provenance metadata.
    #[must_use]
    pub fn with_location(mut self, location: LocationMeta) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the provenance, falling back to "already in RAM".
    #[must_use]
    pub fn location_or_resident(&self) -> LocationMeta {
        self.location.clone().unwrap_or_else(LocationMeta::resident)
    }

    /// Returns the key used to find this artifact's chip on a partition.
    ///
    /// Backslashes are dropped and only the first word is kept, so
    /// `\EFI\Microsoft\Boot\bootmgfw.efi` matches the chip labelled
    /// `ESP: \EFI\Microsoft\Boot\bootmgfw.efi`.
    #[must_use]
    pub fn anchor_key(&self) -> String {
        anchor_key(&self.label)
    }
}

pub(crate) fn anchor_key(label: &str) -> String {
    let stripped: String = label.chars().filter(|c| *c != '\\').collect();
    stripped.split(' ').next().unwrap_or_default().to_string()
}

/// A file shown as a chip on one of the disk partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Chip label (e.g. `"Windows: ntoskrnl.exe"`).
    pub label: String,

    /// Short explanation shown on inspection.
    #[serde(default)]
    pub tip: String,

    /// The partition that displays this chip.
    pub partition: SourceLocation,

    /// Provenance shown on inspection.
    #[serde(default, alias = "where", skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationMeta>,
}

impl LibraryEntry {
    /// Creates a new library entry.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        partition: SourceLocation,
        tip: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            tip: tip.into(),
            partition,
            location: None,
        }
    }

    /// Sets the provenance metadata.
    #[must_use]
    pub fn with_location(mut self, location: LocationMeta) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the provenance, falling back to the generic disk description.
    #[must_use]
    pub fn location_or_generic(&self) -> LocationMeta {
        self.location.clone().unwrap_or_else(LocationMeta::generic)
    }
}
