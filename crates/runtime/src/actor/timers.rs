//! Supervised buff reversion timers.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::task::AbortHandle;

/// Pending buff reversions owned by one actor.
///
/// Each timer is a spawned task that sleeps and then reverts a bonus. A
/// terminal transition calls [`cancel_all`](Self::cancel_all) so no reversion
/// runs against a defeated actor.
#[derive(Debug, Default)]
pub struct BuffTimers {
    pending: Mutex<Vec<AbortHandle>>,
}

impl BuffTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `task` on the current runtime and tracks it.
    ///
    /// Returns false when no runtime is available; the caller then reverts
    /// immediately.
    pub fn schedule<F>(&self, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return false;
        };
        let handle = runtime.spawn(task).abort_handle();
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|timer| !timer.is_finished());
        pending.push(handle);
        true
    }

    /// Aborts every pending timer. Returns how many were still running.
    pub fn cancel_all(&self) -> usize {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let running = pending.iter().filter(|timer| !timer.is_finished()).count();
        for timer in pending.drain(..) {
            timer.abort();
        }
        running
    }

    /// Timers that have not fired yet.
    pub fn pending(&self) -> usize {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|timer| !timer.is_finished());
        pending.len()
    }
}
