//! # Debounce
//!
//! Collapses bursts of calls into one, fired after a quiet period.
//!
//! ## Timeline (delay = 300 ms)
//! ```text
//! call("s")  call("sa")  call("sav")                 fires("sav")
//!    │  <300ms  │  <300ms   │ ────────── 300 ms ─────────► │
//!    └ timer ✘  └ timer ✘   └ timer ✔
//! ```
//! Each call cancels the pending timer before scheduling a new one, so at
//! most one timer is in flight per instance and only the last call's
//! arguments reach the callback.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::RuntimeResult;
use crate::scheduler::{ScheduledTask, Scheduler, TokioScheduler};

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

struct Pending<A> {
    /// Bumped on every call; a timer only fires if it still matches.
    generation: u64,
    args: Option<A>,
    task: Option<ScheduledTask>,
}

impl<A> Pending<A> {
    fn clear(&mut self) -> Option<A> {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        self.args.take()
    }
}

fn lock<A>(state: &Mutex<Pending<A>>) -> MutexGuard<'_, Pending<A>> {
    state.lock().unwrap_or_else(|poisoned| {
        warn!("Debounce state lock poisoned, recovering");
        poisoned.into_inner()
    })
}

// =============================================================================
// Debounced Callback
// =============================================================================

/// Callback wrapper that runs only after `delay` without new calls.
///
/// Dropping the wrapper cancels the pending call.
pub struct DebouncedCallback<A: Send + 'static> {
    delay: Duration,
    callback: Callback<A>,
    scheduler: Arc<dyn Scheduler>,
    state: Arc<Mutex<Pending<A>>>,
}

impl<A: Send + 'static> DebouncedCallback<A> {
    /// Debouncer on the current Tokio runtime.
    pub fn new<F>(delay: Duration, callback: F) -> RuntimeResult<Self>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Ok(Self::with_scheduler(
            Arc::new(TokioScheduler::current()?),
            delay,
            callback,
        ))
    }

    pub fn with_scheduler<F>(scheduler: Arc<dyn Scheduler>, delay: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        DebouncedCallback {
            delay,
            callback: Arc::new(callback),
            scheduler,
            state: Arc::new(Mutex::new(Pending {
                generation: 0,
                args: None,
                task: None,
            })),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records `args` and restarts the quiet-period timer.
    pub fn call(&self, args: A) {
        let mut pending = lock(&self.state);
        pending.clear();
        pending.args = Some(args);
        let generation = pending.generation;

        let state = Arc::clone(&self.state);
        let callback = Arc::clone(&self.callback);
        let task = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                let args = {
                    let mut pending = lock(&state);
                    if pending.generation != generation {
                        return;
                    }
                    pending.args.take()
                };
                if let Some(args) = args {
                    callback(args);
                }
            }),
        );
        pending.task = Some(task);
    }

    /// Runs the pending call now, if any. Returns whether it ran.
    pub fn flush(&self) -> bool {
        let args = lock(&self.state).clear();
        match args {
            Some(args) => {
                (self.callback)(args);
                true
            }
            None => false,
        }
    }

    /// Drops the pending call without running it.
    pub fn cancel(&self) {
        if lock(&self.state).clear().is_some() {
            debug!("Debounced call cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.state).args.is_some()
    }
}

impl<A: Send + 'static> Drop for DebouncedCallback<A> {
    fn drop(&mut self) {
        lock(&self.state).clear();
    }
}

// =============================================================================
// Debounced Value
// =============================================================================

/// A value that settles `delay` after its last change.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use comptoir_runtime::DebouncedValue;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let search = DebouncedValue::new(String::new(), Duration::from_millis(300)).unwrap();
/// search.set("sav".to_string());
/// assert_eq!(search.get(), "");
/// tokio::time::sleep(Duration::from_millis(301)).await;
/// assert_eq!(search.get(), "sav");
/// # }
/// ```
pub struct DebouncedValue<T: Clone + Send + Sync + 'static> {
    debouncer: DebouncedCallback<T>,
    settled: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> DebouncedValue<T> {
    pub fn new(initial: T, delay: Duration) -> RuntimeResult<Self> {
        Ok(Self::with_scheduler(
            Arc::new(TokioScheduler::current()?),
            initial,
            delay,
        ))
    }

    pub fn with_scheduler(scheduler: Arc<dyn Scheduler>, initial: T, delay: Duration) -> Self {
        let (tx, settled) = watch::channel(initial);
        let debouncer = DebouncedCallback::with_scheduler(scheduler, delay, move |value: T| {
            tx.send_replace(value);
        });
        DebouncedValue { debouncer, settled }
    }

    /// Proposes a new value; it becomes visible after the quiet period.
    pub fn set(&self, value: T) {
        self.debouncer.call(value);
    }

    /// The settled value.
    pub fn get(&self) -> T {
        self.settled.borrow().clone()
    }

    /// Receiver notified each time the value settles.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.settled.clone()
    }

    /// Settles the pending value immediately.
    pub fn flush(&self) -> bool {
        self.debouncer.flush()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |s: String| sink.lock().unwrap().push(s))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_args() {
        let (calls, callback) = recorder();
        let debounced = DebouncedCallback::new(Duration::from_millis(300), callback).unwrap();

        for query in ["s", "sa", "sav", "savo", "savon"] {
            debounced.call(query.to_string());
            sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().unwrap().is_empty());
        assert!(debounced.is_pending());

        sleep(Duration::from_millis(250)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["savon".to_string()]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (calls, callback) = recorder();
        let debounced = DebouncedCallback::new(Duration::from_millis(200), callback).unwrap();

        debounced.call("a".into());
        sleep(Duration::from_millis(250)).await;
        debounced.call("b".into());
        sleep(Duration::from_millis(250)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_and_cancel() {
        let (calls, callback) = recorder();
        let debounced = DebouncedCallback::new(Duration::from_millis(200), callback).unwrap();

        debounced.call("now".into());
        assert!(debounced.flush());
        assert!(!debounced.flush());

        debounced.call("never".into());
        debounced.cancel();
        sleep(Duration::from_millis(500)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["now".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (calls, callback) = recorder();
        let debounced = DebouncedCallback::new(Duration::from_millis(100), callback).unwrap();
        debounced.call("torn down".into());
        drop(debounced);

        sleep(Duration::from_millis(300)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_value_settles() {
        let value = DebouncedValue::new(0u32, Duration::from_millis(300)).unwrap();
        let mut rx = value.subscribe();

        value.set(1);
        sleep(Duration::from_millis(100)).await;
        value.set(2);
        assert_eq!(value.get(), 0);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 2);
        assert_eq!(value.get(), 2);
    }
}
