//! # Scheduler
//!
//! One-shot delayed jobs on the Tokio runtime.
//!
//! ```text
//! schedule(delay, job) ──► tokio::spawn(sleep(delay); job())
//!        │
//!        └──► ScheduledTask ──cancel()/drop──► abort the sleeping task
//! ```
//!
//! Debounce and throttle hold at most one [`ScheduledTask`] each; replacing
//! or dropping it cancels the pending job.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::error::{RuntimeError, RuntimeResult};

/// A boxed job run once by a scheduler.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs after a delay.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, job: Job) -> ScheduledTask;

    /// Scheduler's notion of "now".
    fn now(&self) -> Instant;
}

/// Handle to a pending job. Dropping it cancels the job.
#[derive(Debug)]
pub struct ScheduledTask {
    abort: Option<AbortHandle>,
}

impl ScheduledTask {
    pub fn cancel(&self) {
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    /// Whether the job ran or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.abort.as_ref().map_or(true, AbortHandle::is_finished)
    }

    /// Releases the handle without cancelling the job.
    ///
    /// Used by a job to clear its own handle while it runs.
    pub fn detach(mut self) {
        self.abort = None;
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// Tokio Scheduler
// =============================================================================

/// Scheduler spawning onto a Tokio runtime.
///
/// Uses `tokio::time`, so tests with a paused clock control it.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        TokioScheduler { handle }
    }

    /// Scheduler on the runtime of the calling task.
    pub fn current() -> RuntimeResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| RuntimeError::NoRuntime)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, job: Job) -> ScheduledTask {
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            job();
        });
        ScheduledTask {
            abort: Some(task.abort_handle()),
        }
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}
