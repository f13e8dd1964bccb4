//! Stage records: one discrete step of the boot narrative.

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactTransfer;
use super::location::SourceLocation;

/// The narrative "owner of execution" at a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    /// Short badge shown next to the name.
    #[serde(default)]
    pub icon: String,
    /// Display name (e.g. "UEFI firmware").
    pub name: String,
}

impl Controller {
    /// Creates a new controller label.
    #[must_use]
    pub fn new(icon: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            name: name.into(),
        }
    }
}

/// One stage of the boot timeline.
///
/// Stages are immutable once placed in a catalog. The catalog assigns
/// `index` from the stage's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// 0-based position in the catalog.
    #[serde(default)]
    pub index: usize,

    /// Short badge shown in the heading.
    #[serde(default)]
    pub icon: String,

    /// Stage title.
    pub title: String,

    /// Stage subtitle.
    #[serde(default, alias = "sub")]
    pub subtitle: String,

    /// Name of the boot layer (e.g. "Firmware", "Kernel").
    #[serde(default, alias = "layer")]
    pub layer_name: String,

    /// Who controls execution at this stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<Controller>,

    /// Whether Secure Boot verification is active.
    #[serde(default, alias = "secureBoot")]
    pub secure_boot: bool,

    /// Whether the TPM is active.
    #[serde(default)]
    pub tpm: bool,

    /// Where this stage pulls artifacts from; also the disk focus.
    #[serde(default, alias = "diskFocus")]
    pub source_location: SourceLocation,

    /// Narrative text.
    #[serde(default, alias = "explain")]
    pub explanation: String,

    /// Artifacts introduced into memory at this stage, in order.
    #[serde(default, alias = "toRAM")]
    pub artifacts: Vec<ArtifactTransfer>,
}

impl Stage {
    /// Creates a new stage with the given title and no artifacts.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            index: 0,
            icon: String::new(),
            title: title.into(),
            subtitle: String::new(),
            layer_name: String::new(),
            controller: None,
            secure_boot: false,
            tpm: false,
            source_location: SourceLocation::None,
            explanation: String::new(),
            artifacts: Vec::new(),
        }
    }

    /// Sets the heading badge.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Sets the layer name.
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer_name = layer.into();
        self
    }

    /// Sets the controller.
    #[must_use]
    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Sets both security signals.
    #[must_use]
    pub fn with_security(mut self, secure_boot: bool, tpm: bool) -> Self {
        self.secure_boot = secure_boot;
        self.tpm = tpm;
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source_location = source;
        self
    }

    /// Sets the explanation.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Appends an artifact.
    #[must_use]
    pub fn with_artifact(mut self, artifact: ArtifactTransfer) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Returns the heading: `"{icon} {title} - {subtitle}"`.
    #[must_use]
    pub fn heading(&self) -> String {
        let mut heading = String::new();
        if !self.icon.is_empty() {
            heading.push_str(&self.icon);
            heading.push(' ');
        }
        heading.push_str(&self.title);
        if !self.subtitle.is_empty() {
            heading.push_str(" - ");
            heading.push_str(&self.subtitle);
        }
        heading
    }

    /// Finds an artifact declared by this stage.
    #[must_use]
    pub fn artifact(&self, label: &str) -> Option<&ArtifactTransfer> {
        self.artifacts.iter().find(|a| a.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OriginKind;

    #[test]
    fn test_stage_builder() {
        let stage = Stage::new("UEFI firmware")
            .with_icon("🧠")
            .with_subtitle("Checks + finds boot entry")
            .with_layer("Firmware")
            .with_security(true, true)
            .with_source(SourceLocation::Esp)
            .with_artifact(ArtifactTransfer::new(
                "ESP located",
                OriginKind::Esp,
                "UEFI finds the ESP.",
            ));

        assert_eq!(stage.layer_name, "Firmware");
        assert!(stage.secure_boot);
        assert_eq!(stage.artifacts.len(), 1);
        assert!(stage.artifact("ESP located").is_some());
        assert!(stage.artifact("missing").is_none());
    }

    #[test]
    fn test_heading() {
        let stage = Stage::new("Power On")
            .with_icon("⚡")
            .with_subtitle("Hardware wakes up");
        assert_eq!(stage.heading(), "⚡ Power On - Hardware wakes up");

        assert_eq!(Stage::new("Bare").heading(), "Bare");
    }

    #[test]
    fn test_stage_accepts_short_field_names() {
        let json = serde_json::json!({
            "title": "Kernel starts",
            "sub": "CPU + memory control",
            "layer": "Kernel",
            "secureBoot": false,
            "tpm": true,
            "diskFocus": "win",
            "explain": "The kernel takes control.",
            "toRAM": [{"label": "Kernel running", "source": "ram"}]
        });
        let stage: Stage = serde_json::from_value(json).unwrap();
        assert_eq!(stage.source_location, SourceLocation::Windows);
        assert_eq!(stage.artifacts[0].origin, OriginKind::Resident);
        assert!(stage.controller.is_none());
    }
}
