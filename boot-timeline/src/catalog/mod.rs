//! The immutable stage catalog.
//!
//! A catalog is an ordered, non-empty list of [`Stage`] records plus the disk
//! library shown on the partitions. It is validated once at construction and
//! then shared read-only between sessions.

mod windows;

pub use windows::windows_boot;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::core::{ArtifactTransfer, LibraryEntry, SourceLocation, Stage};
use crate::errors::{CatalogError, Result};
use crate::utils::clamp_index;

/// Serialized catalog layout.
#[derive(Debug, Deserialize, Serialize)]
struct CatalogDocument {
    stages: Vec<Stage>,
    #[serde(default)]
    library: Vec<LibraryEntry>,
}

/// An immutable, ordered sequence of stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCatalog {
    stages: Vec<Stage>,
    library: Vec<LibraryEntry>,
}

impl StageCatalog {
    /// Creates a catalog builder.
    #[must_use]
    pub fn builder() -> StageCatalogBuilder {
        StageCatalogBuilder::default()
    }

    /// Parses a catalog from JSON of the form `{"stages": [...], "library": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::builder().stages(doc.stages).library(doc.library).build()
    }

    /// Serializes the catalog to JSON.
    pub fn to_json(&self) -> Result<String> {
        let doc = CatalogDocument {
            stages: self.stages.clone(),
            library: self.library.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Returns the number of stages. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns the index of the final stage.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.stages.len() - 1
    }

    /// Returns the stage at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// Returns the stage at the clamped index. Never fails.
    #[must_use]
    pub fn get_clamped(&self, index: i64) -> &Stage {
        &self.stages[clamp_index(index, self.stages.len())]
    }

    /// Returns all stages in order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns the disk library.
    #[must_use]
    pub fn library(&self) -> &[LibraryEntry] {
        &self.library
    }

    /// Returns the library chips displayed on `partition`.
    pub fn library_for(&self, partition: SourceLocation) -> impl Iterator<Item = &LibraryEntry> {
        self.library
            .iter()
            .filter(move |entry| entry.partition == partition)
    }

    /// Finds the first stage declaring an artifact with `label`.
    #[must_use]
    pub fn find_artifact(&self, label: &str) -> Option<(&Stage, &ArtifactTransfer)> {
        self.stages
            .iter()
            .find_map(|stage| stage.artifact(label).map(|artifact| (stage, artifact)))
    }

    /// Finds a library entry by its chip label.
    #[must_use]
    pub fn find_library_entry(&self, label: &str) -> Option<&LibraryEntry> {
        self.library.iter().find(|entry| entry.label == label)
    }
}

/// Builder for [`StageCatalog`].
#[derive(Debug, Default)]
pub struct StageCatalogBuilder {
    stages: Vec<Stage>,
    library: Vec<LibraryEntry>,
}

impl StageCatalogBuilder {
    /// Appends a stage.
    #[must_use]
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Appends several stages.
    #[must_use]
    pub fn stages(mut self, stages: impl IntoIterator<Item = Stage>) -> Self {
        self.stages.extend(stages);
        self
    }

    /// Appends a library entry.
    #[must_use]
    pub fn library_entry(mut self, entry: LibraryEntry) -> Self {
        self.library.push(entry);
        self
    }

    /// Appends several library entries.
    #[must_use]
    pub fn library(mut self, entries: impl IntoIterator<Item = LibraryEntry>) -> Self {
        self.library.extend(entries);
        self
    }

    /// Validates the stages and assigns contiguous indices.
    pub fn build(self) -> Result<StageCatalog> {
        if self.stages.is_empty() {
            return Err(CatalogError::empty().into());
        }

        let mut stages = self.stages;
        for (position, stage) in stages.iter_mut().enumerate() {
            stage.index = position;

            let mut seen = HashSet::new();
            for artifact in &stage.artifacts {
                if artifact.label.trim().is_empty() {
                    return Err(CatalogError::blank_label(position).into());
                }
                if !seen.insert(artifact.label.as_str()) {
                    return Err(CatalogError::duplicate_label(position, &artifact.label).into());
                }
            }
        }

        debug!(
            stages = stages.len(),
            library = self.library.len(),
            "Stage catalog built"
        );

        Ok(StageCatalog {
            stages,
            library: self.library,
        })
    }
}
