//! Transfer scheduling: which artifacts fly from disk to RAM, and when.
//!
//! The scheduler only describes moves. Timing and animation belong to the
//! presentation sink.

mod anchor;
mod instruction;
mod scheduler;

pub use anchor::{resolve_anchor, AnchorCandidate};
pub use instruction::{AnchorKind, TransferInstruction};
pub use scheduler::TransferScheduler;
