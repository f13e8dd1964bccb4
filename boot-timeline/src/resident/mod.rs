//! The resident set: artifacts currently "loaded into memory".
//!
//! Append-only and keyed by artifact label. Iteration follows first-insertion
//! order, which is the order the RAM panel lists items in.

use std::collections::HashMap;

use crate::core::ArtifactTransfer;

/// Accumulates artifacts across stage transitions.
#[derive(Debug, Clone, Default)]
pub struct ResidentSet {
    /// Label to position in `items`.
    index: HashMap<String, usize>,
    /// Records in first-insertion order.
    items: Vec<ArtifactTransfer>,
}

impl ResidentSet {
    /// Creates an empty resident set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `artifacts` and returns the ones that were newly inserted.
    ///
    /// The returned delta keeps input order. Labels that are already resident,
    /// or repeated earlier in the same input, are skipped.
    pub fn merge<'a, I>(&mut self, artifacts: I) -> Vec<ArtifactTransfer>
    where
        I: IntoIterator<Item = &'a ArtifactTransfer>,
    {
        let mut delta = Vec::new();
        for artifact in artifacts {
            if self.index.contains_key(&artifact.label) {
                continue;
            }
            self.index.insert(artifact.label.clone(), self.items.len());
            self.items.push(artifact.clone());
            delta.push(artifact.clone());
        }
        delta
    }

    /// Returns all resident artifacts in first-insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ArtifactTransfer> {
        self.items.clone()
    }

    /// Iterates over resident artifacts without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactTransfer> {
        self.items.iter()
    }

    /// Returns whether `label` is resident.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Returns the resident record for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&ArtifactTransfer> {
        self.index.get(label).map(|&position| &self.items[position])
    }

    /// Returns the number of resident artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is resident.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears everything and returns how many records were dropped.
    pub fn reset(&mut self) -> usize {
        let cleared = self.items.len();
        self.index.clear();
        self.items.clear();
        cleared
    }
}
