//! # Throttle
//!
//! Limits a callback to one run per interval, keeping the latest call.
//!
//! ## Timeline (interval = 1 s)
//! ```text
//! t=0     call(a) ──► runs a            (leading edge)
//! t=0.2   call(b)     held
//! t=0.6   call(c)     replaces b
//! t=1.0               runs c            (trailing edge, new cooldown)
//! t=2.5   call(d) ──► runs d            (cooldown over)
//! ```
//! At most one trailing call is pending; it always carries the arguments
//! of the most recent call.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::error::RuntimeResult;
use crate::scheduler::{ScheduledTask, Scheduler, TokioScheduler};

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

struct State<A> {
    last_run: Option<Instant>,
    trailing: Option<A>,
    task: Option<ScheduledTask>,
}

fn lock<A>(state: &Mutex<State<A>>) -> MutexGuard<'_, State<A>> {
    state.lock().unwrap_or_else(|poisoned| {
        warn!("Throttle state lock poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Callback wrapper running at most once per `interval`.
///
/// Dropping the wrapper cancels the trailing call.
pub struct ThrottledCallback<A: Send + 'static> {
    interval: Duration,
    callback: Callback<A>,
    scheduler: Arc<dyn Scheduler>,
    state: Arc<Mutex<State<A>>>,
}

impl<A: Send + 'static> ThrottledCallback<A> {
    /// Throttle on the current Tokio runtime.
    pub fn new<F>(interval: Duration, callback: F) -> RuntimeResult<Self>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Ok(Self::with_scheduler(
            Arc::new(TokioScheduler::current()?),
            interval,
            callback,
        ))
    }

    pub fn with_scheduler<F>(scheduler: Arc<dyn Scheduler>, interval: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        ThrottledCallback {
            interval,
            callback: Arc::new(callback),
            scheduler,
            state: Arc::new(Mutex::new(State {
                last_run: None,
                trailing: None,
                task: None,
            })),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs now if the cooldown is over, otherwise holds `args` for the
    /// trailing run.
    pub fn call(&self, args: A) {
        let now = self.scheduler.now();
        let mut state = lock(&self.state);

        let ready_at = state.last_run.map(|last| last + self.interval);
        match ready_at {
            Some(ready_at) if now < ready_at => {
                state.trailing = Some(args);
                if state.task.is_none() {
                    let task = self.schedule_trailing(ready_at - now);
                    state.task = Some(task);
                }
            }
            _ => {
                state.last_run = Some(now);
                drop(state);
                (self.callback)(args);
            }
        }
    }

    fn schedule_trailing(&self, wait: Duration) -> ScheduledTask {
        let state = Arc::clone(&self.state);
        let callback = Arc::clone(&self.callback);
        let scheduler = Arc::clone(&self.scheduler);

        self.scheduler.schedule(
            wait,
            Box::new(move || {
                let args = {
                    let mut state = lock(&state);
                    if let Some(task) = state.task.take() {
                        task.detach();
                    }
                    let args = state.trailing.take();
                    if args.is_some() {
                        state.last_run = Some(scheduler.now());
                    }
                    args
                };
                if let Some(args) = args {
                    callback(args);
                }
            }),
        )
    }

    /// Runs the trailing call now, if any. Returns whether it ran.
    pub fn flush(&self) -> bool {
        let args = {
            let mut state = lock(&self.state);
            if let Some(task) = state.task.take() {
                task.cancel();
            }
            let args = state.trailing.take();
            if args.is_some() {
                state.last_run = Some(self.scheduler.now());
            }
            args
        };
        match args {
            Some(args) => {
                (self.callback)(args);
                true
            }
            None => false,
        }
    }

    /// Drops the trailing call and ends the cooldown.
    pub fn cancel(&self) {
        let mut state = lock(&self.state);
        if let Some(task) = state.task.take() {
            task.cancel();
        }
        state.trailing = None;
        state.last_run = None;
    }

    /// Whether a trailing call is waiting for the cooldown to end.
    pub fn is_pending(&self) -> bool {
        lock(&self.state).trailing.is_some()
    }
}

impl<A: Send + 'static> Drop for ThrottledCallback<A> {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        if let Some(task) = state.task.take() {
            task.cancel();
        }
        state.trailing = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
