//! # Boot Timeline
//!
//! An interactive, stage-by-stage walkthrough of how a PC boots into Windows
//! under UEFI, from power-on to the login screen.
//!
//! The crate provides:
//!
//! - **Stage catalog**: an ordered, validated list of boot stages, with a
//!   built-in Windows catalog and JSON loading for custom ones
//! - **Resident set**: everything loaded into memory so far, deduplicated by
//!   label and kept in first-insertion order
//! - **Indicators**: Secure Boot, TPM and the component in control per stage
//! - **Transfer scheduling**: staggered disk-to-RAM animations for newly
//!   loaded artifacts
//! - **Navigation**: bounded jumps, step controls and a cancelable auto-play
//!   timer, rendered through a [`view::PresentationSink`]
//! - **Inspection**: plain-language details for any chip or stage
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use boot_timeline::prelude::*;
//! use std::sync::Arc;
//!
//! let controller = TimelineController::builder(Arc::new(windows_boot()))
//!     .presentation_sink(Arc::new(LoggingPresentationSink))
//!     .build()?;
//!
//! controller.next();
//! controller.play()?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod catalog;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod indicators;
pub mod inspection;
pub mod navigation;
pub mod observability;
pub mod resident;
pub mod testing;
pub mod transfer;
pub mod utils;
pub mod view;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{windows_boot, StageCatalog, StageCatalogBuilder};
    pub use crate::config::TimelineConfig;
    pub use crate::core::{
        ArtifactTransfer, Controller, LibraryEntry, LocationKind, LocationMeta, OriginKind,
        SourceLocation, Stage, TimelineEvent,
    };
    pub use crate::errors::{CatalogError, Result, TimelineError};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::indicators::{derive, IndicatorState};
    pub use crate::inspection::{DialogHost, InspectTarget, InspectionDetail, Inspector};
    pub use crate::navigation::{
        NavigationState, TimelineController, TimelineControllerBuilder, TransitionCause,
    };
    pub use crate::resident::ResidentSet;
    pub use crate::transfer::{AnchorKind, TransferInstruction, TransferScheduler};
    pub use crate::view::{
        LoggingPresentationSink, NoOpPresentationSink, PresentationSink, ViewModel,
    };
}
