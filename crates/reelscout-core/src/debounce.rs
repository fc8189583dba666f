//! Trailing-edge debounce timer.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs an action once input has been quiet for `delay`.
///
/// Each [`schedule`](Self::schedule) cancels the previously scheduled action,
/// so only the last call in a burst fires. Cancellation only ever stops the
/// timer: the action itself is synchronous, so anything it spawns outlives
/// later cancels. Dropping the debouncer cancels any pending action.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet interval.
    delay: Duration,
    /// Timer task of the pending action.
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet interval.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `action`, replacing any pending one.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Cancels the pending action. Returns `true` if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some_and(|handle| {
            let waiting = !handle.is_finished();
            handle.abort();
            waiting
        })
    }

    /// Returns `true` if an action is waiting for its quiet interval.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
