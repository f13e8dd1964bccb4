//! The navigation controller: one independent timeline session.

use parking_lot::{Mutex, ReentrantMutex};
use std::cell::Cell;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info};
use uuid::Uuid;

use super::autoplay::AutoPlayTask;
use super::state::{NavigationState, TransitionCause};
use crate::catalog::StageCatalog;
use crate::config::TimelineConfig;
use crate::core::{ArtifactTransfer, TimelineEvent};
use crate::errors::{Result, TimelineError};
use crate::events::{EventSink, NoOpEventSink};
use crate::indicators::derive;
use crate::inspection::{DialogHost, InspectTarget, InspectionDetail, Inspector};
use crate::resident::ResidentSet;
use crate::transfer::{TransferInstruction, TransferScheduler};
use crate::utils::clamp_index;
use crate::view::{NoOpPresentationSink, PresentationSink, ViewModel};

/// Mutable state, guarded by a single lock.
#[derive(Debug, Default)]
struct Session {
    nav: NavigationState,
    resident: ResidentSet,
    autoplay: Option<AutoPlayTask>,
    generation: u64,
    /// Bumped on every transition; stamped on the view it produces.
    revision: u64,
}

/// Output of a state change, delivered after the lock is released.
#[derive(Debug, Default)]
struct Outcome {
    view: Option<ViewModel>,
    events: Vec<TimelineEvent>,
}

struct Inner {
    session_id: Uuid,
    catalog: Arc<StageCatalog>,
    config: TimelineConfig,
    scheduler: TransferScheduler,
    inspector: Inspector,
    presentation: Arc<dyn PresentationSink>,
    events: Arc<dyn EventSink>,
    session: Mutex<Session>,
    /// Revision of the newest view handed to the presentation sink.
    published: ReentrantMutex<Cell<u64>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(task) = self.session.get_mut().autoplay.take() {
            task.abort();
        }
    }
}

/// Drives one timeline session.
///
/// Owns the current stage index, the resident set and the auto-play timer.
/// Clones share the same session. Every transition merges the stage's
/// artifacts, schedules transfers for the newly resident ones and renders a
/// [`ViewModel`] to the presentation sink.
#[derive(Clone)]
pub struct TimelineController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TimelineController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.session.lock();
        f.debug_struct("TimelineController")
            .field("session_id", &self.inner.session_id)
            .field("current_index", &session.nav.current_index)
            .field("autoplay_active", &session.nav.autoplay_active)
            .field("resident", &session.resident.len())
            .finish()
    }
}

impl TimelineController {
    /// Creates a builder for a session over `catalog`.
    #[must_use]
    pub fn builder(catalog: Arc<StageCatalog>) -> TimelineControllerBuilder {
        TimelineControllerBuilder::new(catalog)
    }

    /// Returns this session's identifier.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    /// Returns the catalog this session walks through.
    #[must_use]
    pub fn catalog(&self) -> &Arc<StageCatalog> {
        &self.inner.catalog
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.inner.config
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.inner.catalog.len()
    }

    /// Returns the current stage index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.inner.session.lock().nav.current_index
    }

    /// Returns the navigation state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.inner.session.lock().nav
    }

    /// Returns whether auto-play is running.
    #[must_use]
    pub fn is_autoplay_active(&self) -> bool {
        self.inner.session.lock().nav.autoplay_active
    }

    /// Returns the resident artifacts in first-insertion order.
    #[must_use]
    pub fn resident_snapshot(&self) -> Vec<ArtifactTransfer> {
        self.inner.session.lock().resident.snapshot()
    }

    /// Returns the current view without merging or scheduling anything.
    #[must_use]
    pub fn view(&self) -> ViewModel {
        let session = self.inner.session.lock();
        self.inner.build_view(&session, Vec::new())
    }

    /// Jumps to stage `index`, clamped into range.
    ///
    /// Re-renders even when `index` is already current. Cancels auto-play.
    pub fn go_to(&self, index: i64) {
        let outcome = {
            let mut session = self.inner.session.lock();
            let target = clamp_index(index, self.inner.catalog.len());
            self.inner.transition(&mut session, target, TransitionCause::User)
        };
        self.inner.publish(outcome);
    }

    /// Advances one stage. Does nothing at the last stage.
    pub fn next(&self) {
        self.step(1);
    }

    /// Goes back one stage. Does nothing at the first stage.
    pub fn previous(&self) {
        self.step(-1);
    }

    fn step(&self, offset: i64) {
        let outcome = {
            let mut session = self.inner.session.lock();
            let current = session.nav.current_index;
            let target = clamp_index(
                i64::try_from(current).unwrap_or(i64::MAX).saturating_add(offset),
                self.inner.catalog.len(),
            );
            if target == current {
                return;
            }
            self.inner.transition(&mut session, target, TransitionCause::User)
        };
        self.inner.publish(outcome);
    }

    /// Re-renders the current stage without touching auto-play.
    pub fn refresh(&self) {
        let outcome = {
            let mut session = self.inner.session.lock();
            let current = session.nav.current_index;
            self.inner.transition(&mut session, current, TransitionCause::Refresh)
        };
        self.inner.publish(outcome);
    }

    /// Clears the resident set, stops auto-play and returns to the first stage.
    pub fn reset(&self) {
        let outcome = {
            let mut session = self.inner.session.lock();
            let mut outcome = Outcome::default();
            outcome
                .events
                .extend(self.inner.cancel_autoplay(&mut session, "reset"));
            let cleared = session.resident.reset();
            info!(session_id = %self.inner.session_id, cleared, "Resident set reset");
            outcome
                .events
                .push(TimelineEvent::resident_reset(self.inner.session_id, cleared));
            let next = self.inner.transition(&mut session, 0, TransitionCause::Reset);
            outcome.view = next.view;
            outcome.events.extend(next.events);
            outcome
        };
        self.inner.publish(outcome);
    }

    /// Starts auto-play with the configured interval.
    pub fn play(&self) -> Result<()> {
        self.start_autoplay(self.inner.config.autoplay_interval())
    }

    /// Starts auto-play, advancing one stage every `interval`.
    ///
    /// Restarts the timer if already running. Started at the last stage,
    /// auto-play stops immediately without a transition. Intervals below one
    /// millisecond are raised to one millisecond.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::NoRuntime`] when called outside a tokio
    /// runtime. The session is left unchanged.
    pub fn start_autoplay(&self, interval: Duration) -> Result<()> {
        let runtime = Handle::try_current().map_err(|_| TimelineError::NoRuntime)?;
        let outcome = {
            let mut session = self.inner.session.lock();
            let mut outcome = Outcome::default();
            outcome
                .events
                .extend(self.inner.cancel_autoplay(&mut session, "restart"));

            if session.nav.current_index >= self.inner.catalog.last_index() {
                debug!(session_id = %self.inner.session_id, "Auto-play requested at final stage");
                outcome.events.push(TimelineEvent::autoplay_stopped(
                    self.inner.session_id,
                    "final_stage",
                ));
            } else {
                session.generation += 1;
                let generation = session.generation;
                let weak = Arc::downgrade(&self.inner);
                let task = AutoPlayTask::spawn(&runtime, generation, interval, move || {
                    autoplay_tick(&weak, generation)
                });
                let interval_ms = u64::try_from(task.interval().as_millis()).unwrap_or(u64::MAX);
                session.autoplay = Some(task);
                session.nav.autoplay_active = true;

                info!(session_id = %self.inner.session_id, interval_ms, "Auto-play started");
                outcome
                    .events
                    .push(TimelineEvent::autoplay_started(self.inner.session_id, interval_ms));
            }
            outcome
        };
        self.inner.publish(outcome);
        Ok(())
    }

    /// Stops auto-play. Safe to call when not running.
    ///
    /// Transfers already handed to the sink are not retracted.
    pub fn stop_autoplay(&self) {
        let event = {
            let mut session = self.inner.session.lock();
            self.inner.cancel_autoplay(&mut session, "stopped")
        };
        self.inner.publish(Outcome {
            view: None,
            events: event.into_iter().collect(),
        });
    }

    /// Describes an artifact or library chip by label.
    pub fn inspect_artifact(&self, label: &str) -> InspectionDetail {
        let detail = self.inner.inspector.inspect_artifact(label);
        self.inner.note_fallback(&detail, label);
        detail
    }

    /// Describes a resident item, preferring the record in the resident set.
    pub fn inspect_resident(&self, label: &str) -> InspectionDetail {
        let detail = {
            let session = self.inner.session.lock();
            self.inner.inspector.inspect_resident(&session.resident, label)
        };
        self.inner.note_fallback(&detail, label);
        detail
    }

    /// Describes a stage. The index is clamped.
    #[must_use]
    pub fn inspect_stage(&self, index: i64) -> InspectionDetail {
        self.inner.inspector.inspect_stage(index)
    }

    /// Resolves `target` and opens the dialog with the answer.
    ///
    /// Any target answered with the generic fallback raises a
    /// `timeline.inspect.fallback` event.
    pub fn inspect_into(&self, host: &dyn DialogHost, target: &InspectTarget) -> InspectionDetail {
        let detail = self.inner.inspector.inspect(target);
        self.inner.note_fallback(&detail, &target.key());
        host.open(&detail);
        detail
    }
}

/// One auto-play tick. Returns whether the timer should keep running.
fn autoplay_tick(weak: &Weak<Inner>, generation: u64) -> bool {
    let Some(inner) = weak.upgrade() else {
        return false;
    };

    let (outcome, keep_running) = {
        let mut session = inner.session.lock();
        let current_run = session.autoplay.as_ref().map(AutoPlayTask::generation);
        if current_run != Some(generation) {
            return false;
        }

        let last = inner.catalog.last_index();
        if session.nav.current_index >= last {
            let outcome = Outcome {
                view: None,
                events: inner.finish_autoplay(&mut session).into_iter().collect(),
            };
            (outcome, false)
        } else {
            let target = session.nav.current_index + 1;
            // Finish first so the final view reports auto-play as stopped.
            let stop = if target == last {
                inner.finish_autoplay(&mut session)
            } else {
                None
            };
            let mut outcome = inner.transition(&mut session, target, TransitionCause::AutoPlay);
            let keep_running = stop.is_none();
            outcome.events.extend(stop);
            (outcome, keep_running)
        }
    };

    inner.publish(outcome);
    keep_running
}

impl Inner {
    /// Commits a move to `target` and prepares the view to render.
    fn transition(&self, session: &mut Session, target: usize, cause: TransitionCause) -> Outcome {
        let mut outcome = Outcome::default();
        if cause.cancels_autoplay() {
            outcome.events.extend(self.cancel_autoplay(session, "navigation"));
        }

        session.nav.current_index = target;
        session.revision += 1;
        let stage = &self.catalog.stages()[target];
        let delta = session.resident.merge(&stage.artifacts);
        let transfers = self.scheduler.schedule(stage, &delta);

        debug!(
            session_id = %self.session_id,
            stage = target,
            cause = %cause,
            delta = delta.len(),
            resident = session.resident.len(),
            "Stage entered"
        );

        outcome.events.push(TimelineEvent::stage_entered(
            self.session_id,
            target,
            &stage.title,
            delta.len(),
        ));
        outcome.view = Some(self.build_view(session, transfers));
        outcome
    }

    fn build_view(&self, session: &Session, transfers: Vec<TransferInstruction>) -> ViewModel {
        let index = session.nav.current_index;
        let stage = self.catalog.stages()[index].clone();
        ViewModel {
            session_id: self.session_id,
            revision: session.revision,
            stage_index: index,
            stage_count: self.catalog.len(),
            indicators: derive(&stage),
            focus: stage.source_location,
            stage,
            resident: session.resident.snapshot(),
            transfers,
            autoplay_active: session.nav.autoplay_active,
        }
    }

    /// Cancels a running timer. Returns the stop event if one was running.
    fn cancel_autoplay(&self, session: &mut Session, reason: &str) -> Option<TimelineEvent> {
        let task = session.autoplay.take()?;
        task.abort();
        session.nav.autoplay_active = false;
        info!(session_id = %self.session_id, reason, "Auto-play stopped");
        Some(TimelineEvent::autoplay_stopped(self.session_id, reason))
    }

    /// Ends auto-play from inside its own tick.
    fn finish_autoplay(&self, session: &mut Session) -> Option<TimelineEvent> {
        let task = session.autoplay.take()?;
        task.finish();
        session.nav.autoplay_active = false;
        info!(session_id = %self.session_id, "Auto-play reached final stage");
        Some(TimelineEvent::autoplay_stopped(self.session_id, "final_stage"))
    }

    fn note_fallback(&self, detail: &InspectionDetail, key: &str) {
        if detail.is_fallback() {
            self.publish(Outcome {
                view: None,
                events: vec![TimelineEvent::inspect_fallback(self.session_id, key)],
            });
        }
    }

    /// Renders and emits outside the session lock.
    ///
    /// Deliveries are serialized, and a view older than the last rendered one
    /// is dropped, so the sink always ends on the session's newest state. The
    /// guard is reentrant: a sink may call back into the session from
    /// `render`, in which case the nested render completes inside the outer one.
    fn publish(&self, outcome: Outcome) {
        let last_rendered = self.published.lock();
        if let Some(view) = outcome.view {
            if view.revision >= last_rendered.get() {
                last_rendered.set(view.revision);
                self.presentation.render(&view);
            } else {
                debug!(
                    session_id = %self.session_id,
                    revision = view.revision,
                    newest = last_rendered.get(),
                    "Dropped stale view"
                );
            }
        }
        for event in &outcome.events {
            self.events.emit(event);
        }
    }
}

/// Builder for [`TimelineController`].
pub struct TimelineControllerBuilder {
    catalog: Arc<StageCatalog>,
    config: TimelineConfig,
    presentation: Arc<dyn PresentationSink>,
    events: Arc<dyn EventSink>,
}

impl TimelineControllerBuilder {
    /// Creates a builder with default configuration and no-op sinks.
    #[must_use]
    pub fn new(catalog: Arc<StageCatalog>) -> Self {
        Self {
            catalog,
            config: TimelineConfig::default(),
            presentation: Arc::new(NoOpPresentationSink),
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: TimelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the presentation sink.
    #[must_use]
    pub fn presentation_sink(mut self, sink: Arc<dyn PresentationSink>) -> Self {
        self.presentation = sink;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Validates the configuration, creates the session and renders stage 0.
    pub fn build(self) -> Result<TimelineController> {
        self.config.validate()?;

        let inner = Inner {
            session_id: Uuid::new_v4(),
            scheduler: TransferScheduler::from_config(&self.config),
            inspector: Inspector::new(self.catalog.clone()),
            catalog: self.catalog,
            config: self.config,
            presentation: self.presentation,
            events: self.events,
            session: Mutex::new(Session::default()),
            published: ReentrantMutex::new(Cell::new(0)),
        };
        let controller = TimelineController {
            inner: Arc::new(inner),
        };

        info!(
            session_id = %controller.inner.session_id,
            stages = controller.stage_count(),
            "Timeline session created"
        );

        let outcome = {
            let mut session = controller.inner.session.lock();
            controller
                .inner
                .transition(&mut session, 0, TransitionCause::Initial)
        };
        controller.inner.publish(outcome);
        Ok(controller)
    }
}
