//! Fail-soft resolution of a transfer's source chip.

use tracing::debug;

use super::instruction::TransferInstruction;
use crate::core::LibraryEntry;

/// Something a sink can start a transfer visual from.
pub trait AnchorCandidate {
    /// Text used to match against an instruction's anchor key.
    fn anchor_text(&self) -> &str;
}

impl AnchorCandidate for LibraryEntry {
    fn anchor_text(&self) -> &str {
        &self.label
    }
}

impl AnchorCandidate for String {
    fn anchor_text(&self) -> &str {
        self
    }
}

impl AnchorCandidate for &str {
    fn anchor_text(&self) -> &str {
        self
    }
}

/// Picks the candidate to start `instruction` from.
///
/// A candidate matches when its text, with backslashes removed, contains the
/// instruction's anchor key. Without a match the first candidate is used.
/// Returns `None` only for an empty candidate list.
pub fn resolve_anchor<'a, C: AnchorCandidate>(
    instruction: &TransferInstruction,
    candidates: &'a [C],
) -> Option<&'a C> {
    let key = instruction.anchor_key();
    let matched = (!key.is_empty())
        .then(|| {
            candidates.iter().find(|candidate| {
                candidate
                    .anchor_text()
                    .chars()
                    .filter(|c| *c != '\\')
                    .collect::<String>()
                    .contains(&key)
            })
        })
        .flatten();

    matched.or_else(|| {
        let fallback = candidates.first();
        if fallback.is_some() {
            debug!(
                artifact = %instruction.artifact_label,
                "No matching anchor, using first candidate"
            );
        }
        fallback
    })
}
