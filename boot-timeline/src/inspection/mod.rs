//! Inspection: "where does this live?" answers for the dialog subsystem.
//!
//! Every lookup succeeds. Unknown keys get a generic answer, because
//! inspection is informational and must never interrupt the timeline.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::StageCatalog;
use crate::core::{LocationKind, LocationMeta};
use crate::resident::ResidentSet;

/// Body used when nothing describes the inspected item.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// One node in a provenance mini-diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramNode {
    /// ESP (boot files).
    Esp,
    /// Windows partition.
    Windows,
    /// UEFI firmware chip.
    Firmware,
    /// Already in RAM.
    AlreadyResident,
    /// Storage/Firmware.
    Storage,
    /// RAM (loaded).
    Loaded,
    /// CPU runs it.
    Executes,
}

impl DiagramNode {
    /// Display caption for the node.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Esp => "ESP (boot files)",
            Self::Windows => "Windows partition",
            Self::Firmware => "UEFI firmware chip",
            Self::AlreadyResident => "Already in RAM",
            Self::Storage => "Storage/Firmware",
            Self::Loaded => "RAM (loaded)",
            Self::Executes => "CPU runs it ✅",
        }
    }
}

/// The tuple handed to the dialog subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionDetail {
    /// Dialog title.
    pub title: String,
    /// Dialog body text.
    pub body: String,
    /// Provenance.
    pub location: LocationMeta,
}

impl InspectionDetail {
    /// Creates a new detail tuple.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, location: LocationMeta) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            location,
        }
    }

    /// Returns the source → RAM → CPU path for the mini-diagram.
    ///
    /// Items already in memory skip the "loaded" step.
    #[must_use]
    pub fn diagram(&self) -> Vec<DiagramNode> {
        let source = match self.location.kind {
            LocationKind::Esp => DiagramNode::Esp,
            LocationKind::Windows => DiagramNode::Windows,
            LocationKind::Firmware => DiagramNode::Firmware,
            LocationKind::Resident => {
                return vec![DiagramNode::AlreadyResident, DiagramNode::Executes];
            }
            LocationKind::Generic => DiagramNode::Storage,
        };
        vec![source, DiagramNode::Loaded, DiagramNode::Executes]
    }

    /// Returns whether this detail is the generic fallback.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.location.kind == LocationKind::Generic
    }
}

/// The dialog subsystem, seen from the timeline.
///
/// `open` must move keyboard focus to the dialog's close control.
pub trait DialogHost: Send + Sync {
    /// Shows the dialog with `detail`.
    fn open(&self, detail: &InspectionDetail);

    /// Hides the dialog. Safe to call when already closed.
    fn close(&self);
}

/// What the user asked to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectTarget {
    /// An artifact or library chip, by label.
    Artifact(String),
    /// A stage, by (possibly out-of-range) index.
    Stage(i64),
    /// A free-form info box with an optional location tag.
    Tagged {
        /// Dialog title.
        title: String,
        /// Dialog body.
        body: String,
        /// Location tag such as "ESP" or "RAM".
        tag: Option<String>,
    },
}

impl InspectTarget {
    /// Names the target in fallback events: the label, the tag (or title
    /// when untagged), or `stage:{index}`.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Artifact(label) => label.clone(),
            Self::Stage(index) => format!("stage:{index}"),
            Self::Tagged { title, tag, .. } => tag.clone().unwrap_or_else(|| title.clone()),
        }
    }
}

/// Answers inspection requests against a catalog.
#[derive(Debug, Clone)]
pub struct Inspector {
    catalog: Arc<StageCatalog>,
}

impl Inspector {
    /// Creates an inspector over `catalog`.
    #[must_use]
    pub const fn new(catalog: Arc<StageCatalog>) -> Self {
        Self { catalog }
    }

    /// Describes an artifact or library chip by label.
    ///
    /// Stage artifacts are searched first, then the disk library.
    #[must_use]
    pub fn inspect_artifact(&self, label: &str) -> InspectionDetail {
        self.lookup_artifact(label)
            .unwrap_or_else(|| Self::fallback(label))
    }

    /// Describes an artifact, returning `None` on a miss.
    #[must_use]
    pub fn lookup_artifact(&self, label: &str) -> Option<InspectionDetail> {
        if let Some((_, artifact)) = self.catalog.find_artifact(label) {
            return Some(InspectionDetail::new(
                &artifact.label,
                &artifact.note,
                artifact.location_or_resident(),
            ));
        }
        self.catalog.find_library_entry(label).map(|entry| {
            InspectionDetail::new(&entry.label, &entry.tip, entry.location_or_generic())
        })
    }

    /// Describes a resident item using the record stored in `resident`.
    #[must_use]
    pub fn inspect_resident(&self, resident: &ResidentSet, label: &str) -> InspectionDetail {
        resident.get(label).map_or_else(
            || self.inspect_artifact(label),
            |artifact| {
                InspectionDetail::new(
                    &artifact.label,
                    &artifact.note,
                    artifact.location_or_resident(),
                )
            },
        )
    }

    /// Describes a stage. The index is clamped.
    #[must_use]
    pub fn inspect_stage(&self, index: i64) -> InspectionDetail {
        let stage = self.catalog.get_clamped(index);
        InspectionDetail::new(
            stage.heading(),
            &stage.explanation,
            LocationMeta::for_focus(stage.source_location),
        )
    }

    /// Describes a free-form info box.
    #[must_use]
    pub fn inspect_tagged(title: &str, body: &str, tag: Option<&str>) -> InspectionDetail {
        let title = if title.is_empty() { "Info" } else { title };
        let body = if body.is_empty() { NO_DESCRIPTION } else { body };
        InspectionDetail::new(title, body, LocationMeta::from_tag(tag.unwrap_or_default()))
    }

    /// Resolves any inspection target.
    #[must_use]
    pub fn inspect(&self, target: &InspectTarget) -> InspectionDetail {
        match target {
            InspectTarget::Artifact(label) => self.inspect_artifact(label),
            InspectTarget::Stage(index) => self.inspect_stage(*index),
            InspectTarget::Tagged { title, body, tag } => {
                Self::inspect_tagged(title, body, tag.as_deref())
            }
        }
    }

    fn fallback(label: &str) -> InspectionDetail {
        debug!(label = %label, "Inspection fell back to generic description");
        InspectionDetail::new(label, NO_DESCRIPTION, LocationMeta::generic())
    }
}
