//! Storage locations, artifact origins and provenance metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a stage pulls its artifacts from.
///
/// This is also the disk panel focus for the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLocation {
    /// Nothing is loaded from storage (hardware only).
    #[default]
    None,
    /// The EFI System Partition.
    Esp,
    /// The Windows system partition.
    #[serde(alias = "win")]
    Windows,
    /// The artifacts are already in memory.
    #[serde(alias = "ram")]
    Resident,
}

impl SourceLocation {
    /// Returns the disk panel focus label.
    #[must_use]
    pub const fn focus_label(self) -> &'static str {
        match self {
            Self::Esp => "Focus: ESP",
            Self::Windows => "Focus: Windows",
            Self::None | Self::Resident => "Focus: Hardware",
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Esp => write!(f, "esp"),
            Self::Windows => write!(f, "win"),
            Self::Resident => write!(f, "ram"),
        }
    }
}

/// Where an individual artifact originates.
///
/// Kept per artifact: a stage focused on one partition may still introduce
/// artifacts that originate elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginKind {
    /// Motherboard firmware (UEFI NVRAM).
    #[serde(alias = "uefi")]
    Firmware,
    /// The EFI System Partition.
    Esp,
    /// The Windows system partition.
    #[serde(alias = "win")]
    Windows,
    /// Already loaded into memory.
    #[serde(alias = "ram")]
    Resident,
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        LocationKind::from(*self).fmt(f)
    }
}

/// The provenance category shown when something is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Motherboard firmware.
    #[serde(alias = "uefi")]
    Firmware,
    /// The EFI System Partition.
    Esp,
    /// The Windows system partition.
    #[serde(alias = "win")]
    Windows,
    /// Memory.
    #[serde(alias = "ram")]
    Resident,
    /// Unknown or unspecified provenance.
    #[default]
    Generic,
}

impl LocationKind {
    /// Parses a short location tag such as `"ESP"`, `"win"` or `"RAM"`.
    ///
    /// Unrecognised tags map to [`LocationKind::Generic`].
    #[must_use]
    pub fn parse_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "uefi" | "firmware" => Self::Firmware,
            "esp" => Self::Esp,
            "win" | "windows" => Self::Windows,
            "ram" | "resident" => Self::Resident,
            _ => Self::Generic,
        }
    }

    /// Returns the display name used for a bare tag.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Firmware => "UEFI",
            Self::Esp => "ESP",
            Self::Windows => "Windows",
            Self::Resident => "RAM",
            Self::Generic => "Generic",
        }
    }

    /// Returns the default hint for this kind.
    #[must_use]
    pub const fn default_hint(self) -> &'static str {
        match self {
            Self::Firmware => "Firmware runs from the motherboard chip (not the disk).",
            Self::Esp => "Boot files live on the EFI System Partition.",
            Self::Windows => "Windows system files live on the Windows partition.",
            Self::Resident => "Already loaded into memory (fast access).",
            Self::Generic => "Loaded into RAM before CPU runs it.",
        }
    }
}

impl From<OriginKind> for LocationKind {
    fn from(origin: OriginKind) -> Self {
        match origin {
            OriginKind::Firmware => Self::Firmware,
            OriginKind::Esp => Self::Esp,
            OriginKind::Windows => Self::Windows,
            OriginKind::Resident => Self::Resident,
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firmware => write!(f, "uefi"),
            Self::Esp => write!(f, "esp"),
            Self::Windows => write!(f, "win"),
            Self::Resident => write!(f, "ram"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// Provenance description: what kind of place, its label and a short hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationMeta {
    /// The location category.
    pub kind: LocationKind,
    /// Short label (e.g. "ESP", "Windows partition").
    pub label: String,
    /// One-line explanation of how the item got there.
    pub hint: String,
}

impl LocationMeta {
    /// Creates new location metadata.
    #[must_use]
    pub fn new(kind: LocationKind, label: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            hint: hint.into(),
        }
    }

    /// Fallback for disk items with no recorded provenance.
    #[must_use]
    pub fn generic() -> Self {
        Self::new(
            LocationKind::Generic,
            "Disk/Firmware",
            "Loaded into RAM before execution",
        )
    }

    /// Fallback for resident items with no recorded provenance.
    #[must_use]
    pub fn resident() -> Self {
        Self::new(
            LocationKind::Resident,
            "RAM",
            "Already loaded and executing from memory",
        )
    }

    /// Builds metadata from a bare location tag using the kind's default hint.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let kind = LocationKind::parse_tag(tag);
        Self::new(kind, kind.display_name(), kind.default_hint())
    }

    /// Describes the disk panel focus of a stage.
    #[must_use]
    pub fn for_focus(focus: SourceLocation) -> Self {
        match focus {
            SourceLocation::Esp => Self::new(
                LocationKind::Esp,
                "ESP",
                "Small EFI System Partition on the disk",
            ),
            SourceLocation::Windows => Self::new(
                LocationKind::Windows,
                "Windows partition",
                "Stored with Windows system files",
            ),
            SourceLocation::Resident => Self::resident(),
            SourceLocation::None => Self::new(
                LocationKind::Firmware,
                "Hardware",
                "Nothing is loaded from disk yet",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_is_case_insensitive() {
        assert_eq!(LocationKind::parse_tag("ESP"), LocationKind::Esp);
        assert_eq!(LocationKind::parse_tag("win"), LocationKind::Windows);
        assert_eq!(LocationKind::parse_tag("Windows"), LocationKind::Windows);
        assert_eq!(LocationKind::parse_tag("UEFI"), LocationKind::Firmware);
        assert_eq!(LocationKind::parse_tag(" ram "), LocationKind::Resident);
        assert_eq!(LocationKind::parse_tag("floppy"), LocationKind::Generic);
    }

    #[test]
    fn test_from_tag_uses_default_hint() {
        let meta = LocationMeta::from_tag("UEFI");
        assert_eq!(meta.kind, LocationKind::Firmware);
        assert_eq!(meta.label, "UEFI");
        assert!(meta.hint.contains("motherboard"));

        let meta = LocationMeta::from_tag("");
        assert_eq!(meta.kind, LocationKind::Generic);
        assert_eq!(meta.label, "Generic");
    }

    #[test]
    fn test_focus_labels() {
        assert_eq!(SourceLocation::Esp.focus_label(), "Focus: ESP");
        assert_eq!(SourceLocation::Windows.focus_label(), "Focus: Windows");
        assert_eq!(SourceLocation::None.focus_label(), "Focus: Hardware");
    }

    #[test]
    fn test_short_aliases_deserialize() {
        let focus: SourceLocation = serde_json::from_str("\"win\"").unwrap();
        assert_eq!(focus, SourceLocation::Windows);
        let origin: OriginKind = serde_json::from_str("\"uefi\"").unwrap();
        assert_eq!(origin, OriginKind::Firmware);
        let kind: LocationKind = serde_json::from_str("\"ram\"").unwrap();
        assert_eq!(kind, LocationKind::Resident);
    }

    #[test]
    fn test_origin_display_matches_location_kind() {
        assert_eq!(OriginKind::Windows.to_string(), "win");
        assert_eq!(OriginKind::Firmware.to_string(), "uefi");
    }
}
