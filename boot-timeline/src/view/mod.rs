//! View models and the presentation sink contract.

mod model;
mod sink;

pub use model::{ViewModel, EMPTY_RESIDENT_MESSAGE};
pub use sink::{
    CollectingPresentationSink, LoggingPresentationSink, NoOpPresentationSink, PresentationSink,
};

#[cfg(test)]
pub(crate) use sink::MockPresentationSink;
