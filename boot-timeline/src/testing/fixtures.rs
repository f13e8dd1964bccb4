//! Test fixtures for timeline sessions.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::catalog::StageCatalog;
use crate::config::TimelineConfig;
use crate::core::{ArtifactTransfer, LocationKind, LocationMeta, OriginKind, SourceLocation, Stage};
use crate::errors::Result;
use crate::events::CollectingEventSink;
use crate::inspection::{DialogHost, InspectionDetail};
use crate::navigation::TimelineController;
use crate::view::CollectingPresentationSink;

/// Two stages: power-on with nothing loaded, then two ESP files.
pub fn two_stage_catalog() -> Result<StageCatalog> {
    catalog_from(vec![
        Stage::new("Power On").with_source(SourceLocation::None),
        Stage::new("Boot Manager")
            .with_source(SourceLocation::Esp)
            .with_security(true, true)
            .with_artifact(esp_file("bootmgfw.efi"))
            .with_artifact(esp_file("BCD store")),
    ])
}

/// Builds a catalog of `count` stages, each loading one Windows file.
///
/// The first stage loads nothing.
pub fn linear_catalog(count: usize) -> Result<StageCatalog> {
    let stages = (0..count.max(1)).map(|i| {
        if i == 0 {
            Stage::new("Stage 0")
        } else {
            Stage::new(format!("Stage {i}"))
                .with_source(SourceLocation::Windows)
                .with_artifact(ArtifactTransfer::new(
                    format!("file-{i}"),
                    OriginKind::Windows,
                    format!("Loaded at stage {i}"),
                ))
        }
    });
    catalog_from(stages.collect())
}

fn esp_file(label: &str) -> ArtifactTransfer {
    ArtifactTransfer::new(label, OriginKind::Esp, format!("{label} from the ESP"))
        .with_location(LocationMeta::new(LocationKind::Esp, "ESP", "Stored on the ESP"))
}

fn catalog_from(stages: Vec<Stage>) -> Result<StageCatalog> {
    StageCatalog::builder().stages(stages).build()
}

/// A session wired to collecting sinks.
#[derive(Debug)]
pub struct TestTimeline {
    /// The session under test.
    pub controller: TimelineController,
    /// Every rendered view.
    pub views: Arc<CollectingPresentationSink>,
    /// Every emitted event.
    pub events: Arc<CollectingEventSink>,
}

impl TestTimeline {
    /// Builds a session over `catalog` with default configuration.
    pub fn new(catalog: StageCatalog) -> Result<Self> {
        Self::with_config(catalog, TimelineConfig::default())
    }

    /// Builds a session over `catalog` with `config`.
    pub fn with_config(catalog: StageCatalog, config: TimelineConfig) -> Result<Self> {
        let views = Arc::new(CollectingPresentationSink::new());
        let events = Arc::new(CollectingEventSink::new());
        let controller = TimelineController::builder(Arc::new(catalog))
            .config(config)
            .presentation_sink(views.clone())
            .event_sink(events.clone())
            .build()?;
        Ok(Self {
            controller,
            views,
            events,
        })
    }
}

/// A dialog host that records what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingDialog {
    opened: RwLock<Vec<InspectionDetail>>,
    open: RwLock<bool>,
}

impl RecordingDialog {
    /// Creates a closed dialog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every detail shown so far.
    #[must_use]
    pub fn opened(&self) -> Vec<InspectionDetail> {
        self.opened.read().clone()
    }

    /// Returns whether the dialog is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.open.read()
    }
}

impl DialogHost for RecordingDialog {
    fn open(&self, detail: &InspectionDetail) {
        self.opened.write().push(detail.clone());
        *self.open.write() = true;
    }

    fn close(&self) {
        *self.open.write() = false;
    }
}
