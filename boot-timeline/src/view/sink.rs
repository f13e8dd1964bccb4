//! Presentation sink trait and implementations.

use tracing::info;

use super::model::ViewModel;

/// Consumer of view models: owns all rendering and animation.
///
/// Called once per transition, after the session has released its state
/// lock, so implementations may call back into the session.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationSink: Send + Sync {
    /// Renders `view`.
    fn render(&self, view: &ViewModel);
}

/// A sink that discards every view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPresentationSink;

impl PresentationSink for NoOpPresentationSink {
    fn render(&self, _view: &ViewModel) {}
}

/// A sink that logs a one-line summary of every view.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPresentationSink;

impl PresentationSink for LoggingPresentationSink {
    fn render(&self, view: &ViewModel) {
        info!(
            session_id = %view.session_id,
            step = %view.step_label(),
            focus = view.focus_label(),
            secure_boot = view.indicators.secure_boot,
            tpm = view.indicators.tpm,
            controller = %view.indicators.controller.name,
            resident = view.resident.len(),
            transfers = view.transfers.len(),
            "{}",
            view.heading()
        );
    }
}

/// A sink that keeps every view it receives.
#[derive(Debug, Default)]
pub struct CollectingPresentationSink {
    views: parking_lot::RwLock<Vec<ViewModel>>,
}

impl CollectingPresentationSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all received views.
    #[must_use]
    pub fn views(&self) -> Vec<ViewModel> {
        self.views.read().clone()
    }

    /// Returns the most recent view.
    #[must_use]
    pub fn last(&self) -> Option<ViewModel> {
        self.views.read().last().cloned()
    }

    /// Returns the number of received views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.read().len()
    }

    /// Returns true if nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.read().is_empty()
    }

    /// Returns the stage indices rendered so far, in order.
    #[must_use]
    pub fn rendered_indices(&self) -> Vec<usize> {
        self.views.read().iter().map(|v| v.stage_index).collect()
    }

    /// Clears all received views.
    pub fn clear(&self) {
        self.views.write().clear();
    }
}

impl PresentationSink for CollectingPresentationSink {
    fn render(&self, view: &ViewModel) {
        self.views.write().push(view.clone());
    }
}
