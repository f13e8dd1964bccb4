//! Auto-play timer task.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Shortest accepted auto-play interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A running auto-play timer.
///
/// Each run gets a fresh generation number. A tick only commits while its
/// generation is still the session's current one, so a tick that raced with
/// a cancellation does nothing.
#[derive(Debug)]
pub(crate) struct AutoPlayTask {
    generation: u64,
    interval: Duration,
    handle: JoinHandle<()>,
}

impl AutoPlayTask {
    /// Spawns a repeating timer on `runtime`.
    ///
    /// `tick` runs once per period, starting one full period from now, until
    /// it returns `false`. Ticks never overlap: the next period is awaited
    /// only after `tick` returns.
    pub(crate) fn spawn<F>(
        runtime: &Handle,
        generation: u64,
        interval: Duration,
        mut tick: F,
    ) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let period = interval.max(MIN_INTERVAL);
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !tick() {
                    break;
                }
            }
        });

        Self {
            generation,
            interval: period,
            handle,
        }
    }

    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) const fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancels any pending tick.
    pub(crate) fn abort(self) {
        self.handle.abort();
    }

    /// Detaches from a task that is about to finish on its own.
    pub(crate) fn finish(self) {
        drop(self.handle);
    }
}
