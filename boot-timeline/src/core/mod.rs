//! Core data model: stages, artifacts, locations and events.

mod artifact;
pub mod event;
mod location;
mod stage;

pub use artifact::{ArtifactTransfer, LibraryEntry};
pub(crate) use artifact::anchor_key;
pub use event::TimelineEvent;
pub use location::{LocationKind, LocationMeta, OriginKind, SourceLocation};
pub use stage::{Controller, Stage};
