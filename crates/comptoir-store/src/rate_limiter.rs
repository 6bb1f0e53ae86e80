//! # Rate Limiter
//!
//! Sliding-window attempt counter, keyed by action (`"login:alice@x.fr"`,
//! `"email-check"`, ...).
//!
//! ## Window Semantics
//! ```text
//! window = 60 s, max_attempts = 3
//!
//!  t=0   t=10  t=20  t=30         t=60  t=61
//!   ✔     ✔     ✔     ✘ (3 live)   ✔ (t=0 left the window)
//! ```
//! An attempt at `t` counts while `now - t < window`. Every check prunes
//! older attempts first; refused attempts are not recorded. Queries never
//! create a key, and [`RateLimiter::cleanup`] drops keys whose window has
//! emptied.
//!
//! The prune-then-append step runs under one mutex, so concurrent callers
//! never both take the last slot.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};

/// Limits of one rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_attempts: u32,
    pub window_ms: i64,
}

impl Default for RateLimitConfig {
    /// 10 attempts per minute.
    fn default() -> Self {
        RateLimitConfig {
            max_attempts: 10,
            window_ms: 60_000,
        }
    }
}

impl RateLimitConfig {
    /// 5 attempts per 15 minutes.
    pub const fn login() -> Self {
        RateLimitConfig {
            max_attempts: 5,
            window_ms: 15 * 60_000,
        }
    }

    /// 10 attempts per minute.
    pub const fn email_check() -> Self {
        RateLimitConfig {
            max_attempts: 10,
            window_ms: 60_000,
        }
    }
}

static GLOBAL: Lazy<RateLimiter> = Lazy::new(|| RateLimiter::new(RateLimitConfig::default()));

/// Sliding-window rate limiter.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock> {
    config: RateLimitConfig,
    clock: C,
    attempts: Mutex<HashMap<String, VecDeque<i64>>>,
}

impl RateLimiter<SystemClock> {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Process-wide limiter: 10 attempts per 60 s.
    pub fn global() -> &'static RateLimiter {
        &GLOBAL
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        RateLimiter {
            config,
            clock,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Records an attempt for `key` if the window has room.
    ///
    /// ## Example
    /// ```rust
    /// use comptoir_store::{RateLimitConfig, RateLimiter};
    ///
    /// let limiter = RateLimiter::new(RateLimitConfig { max_attempts: 2, window_ms: 60_000 });
    /// assert!(limiter.is_allowed("login"));
    /// assert!(limiter.is_allowed("login"));
    /// assert!(!limiter.is_allowed("login"));
    /// assert!(limiter.is_allowed("email-check"));
    /// ```
    pub fn is_allowed(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        let Ok(mut attempts) = self.attempts.lock() else {
            warn!(key, "Rate limiter lock poisoned, allowing attempt");
            return true;
        };

        let max = self.config.max_attempts as usize;
        let Some(window) = attempts.get_mut(key) else {
            if max == 0 {
                debug!(key, "Rate limit reached");
                return false;
            }
            attempts.insert(key.to_string(), VecDeque::from([now]));
            return true;
        };
        self.prune(window, now);

        if window.len() < max {
            window.push_back(now);
            true
        } else {
            debug!(key, attempts = window.len(), "Rate limit reached");
            false
        }
    }

    /// Attempts left in the current window. Records nothing.
    pub fn remaining_attempts(&self, key: &str) -> u32 {
        let used = self.live_attempts(key).len() as u32;
        self.config.max_attempts.saturating_sub(used)
    }

    /// Milliseconds until the next attempt will be allowed (0 if it already is).
    pub fn time_until_reset(&self, key: &str) -> i64 {
        let live = self.live_attempts(key);
        if live.len() < self.config.max_attempts as usize {
            return 0;
        }
        // the oldest live attempt frees the first slot
        let oldest = live.first().copied().unwrap_or_default();
        (oldest + self.config.window_ms - self.clock.now_ms()).max(0)
    }

    /// Forgets every attempt of `key`.
    pub fn reset(&self, key: &str) {
        match self.attempts.lock() {
            Ok(mut attempts) => {
                attempts.remove(key);
            }
            Err(_) => warn!(key, "Rate limiter lock poisoned, reset skipped"),
        }
    }

    /// Drops every key whose window holds no live attempt.
    pub fn cleanup(&self) {
        let now = self.clock.now_ms();
        let Ok(mut attempts) = self.attempts.lock() else {
            warn!("Rate limiter lock poisoned, cleanup skipped");
            return;
        };
        let before = attempts.len();
        attempts.retain(|_, window| {
            self.prune(window, now);
            !window.is_empty()
        });
        debug!(removed = before - attempts.len(), "Rate limiter cleaned up");
    }

    /// Number of keys currently holding attempts.
    pub fn tracked_keys(&self) -> usize {
        self.attempts.lock().map(|attempts| attempts.len()).unwrap_or_default()
    }

    fn live_attempts(&self, key: &str) -> Vec<i64> {
        let now = self.clock.now_ms();
        let Ok(attempts) = self.attempts.lock() else {
            return Vec::new();
        };
        attempts
            .get(key)
            .map(|window| {
                window
                    .iter()
                    .copied()
                    .filter(|&t| now - t < self.config.window_ms)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn prune(&self, window: &mut VecDeque<i64>, now: i64) {
        while window
            .front()
            .is_some_and(|&t| now - t >= self.config.window_ms)
        {
            window.pop_front();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::Arc;
    use std::thread;

    fn limiter(max: u32, window_ms: i64) -> (RateLimiter<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        let limiter = RateLimiter::with_clock(
            RateLimitConfig {
                max_attempts: max,
                window_ms,
            },
            clock.clone(),
        );
        (limiter, clock)
    }

    #[test]
    fn test_window_fills_then_reopens() {
        let (limiter, clock) = limiter(10, 60_000);
        for _ in 0..10 {
            assert!(limiter.is_allowed("login"));
            clock.advance(1_000);
        }
        assert!(!limiter.is_allowed("login"));
        assert_eq!(limiter.remaining_attempts("login"), 0);

        // first attempt was at +0, we are at +10 s
        assert_eq!(limiter.time_until_reset("login"), 50_000);
        clock.advance(50_000);
        assert!(limiter.is_allowed("login"));
    }

    #[test]
    fn test_refused_attempts_are_not_recorded() {
        let (limiter, clock) = limiter(1, 1_000);
        assert!(limiter.is_allowed("k"));
        for _ in 0..5 {
            clock.advance(100);
            assert!(!limiter.is_allowed("k"));
        }
        clock.advance(500);
        assert!(limiter.is_allowed("k"));
    }

    #[test]
    fn test_keys_are_independent_and_resettable() {
        let (limiter, _clock) = limiter(2, 60_000);
        assert!(limiter.is_allowed("a"));
        assert!(limiter.is_allowed("a"));
        assert!(!limiter.is_allowed("a"));
        assert_eq!(limiter.remaining_attempts("b"), 2);
        assert_eq!(limiter.time_until_reset("b"), 0);

        limiter.reset("a");
        assert_eq!(limiter.remaining_attempts("a"), 2);
        assert!(limiter.is_allowed("a"));
    }

    #[test]
    fn test_remaining_attempts_has_no_side_effect() {
        let (limiter, _clock) = limiter(3, 60_000);
        limiter.is_allowed("k");
        assert_eq!(limiter.remaining_attempts("k"), 2);
        assert_eq!(limiter.remaining_attempts("k"), 2);
    }

    #[test]
    fn test_zero_max_attempts_refuses_everything() {
        let (limiter, _clock) = limiter(0, 60_000);
        assert!(!limiter.is_allowed("k"));
        assert_eq!(limiter.remaining_attempts("k"), 0);
    }

    #[test]
    fn test_expired_keys_are_dropped() {
        let (limiter, clock) = limiter(3, 1_000);
        for i in 0..500 {
            assert!(limiter.is_allowed(&format!("email-check:{i}")));
        }
        assert_eq!(limiter.tracked_keys(), 500);

        // read-only queries never add keys
        assert_eq!(limiter.remaining_attempts("unknown"), 3);
        assert_eq!(limiter.time_until_reset("unknown"), 0);
        assert_eq!(limiter.tracked_keys(), 500);

        clock.advance(1_000);
        assert!(limiter.is_allowed("fresh"));
        limiter.cleanup();
        assert_eq!(limiter.tracked_keys(), 1);

        clock.advance(1_000);
        limiter.cleanup();
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn test_refusals_with_zero_max_track_nothing() {
        let (limiter, _clock) = limiter(0, 60_000);
        for i in 0..100 {
            assert!(!limiter.is_allowed(&format!("k{i}")));
        }
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn test_presets() {
        assert_eq!(RateLimitConfig::login().max_attempts, 5);
        assert_eq!(RateLimitConfig::login().window_ms, 900_000);
        assert_eq!(RateLimitConfig::email_check(), RateLimitConfig::default());
        assert_eq!(RateLimiter::global().config().max_attempts, 10);
    }

    #[test]
    fn test_concurrent_callers_share_the_window() {
        let (limiter, _clock) = limiter(50, 60_000);
        let limiter = Arc::new(limiter);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                thread::spawn(move || (0..20).filter(|_| limiter.is_allowed("shared")).count())
            })
            .collect();

        let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(granted, 50);
    }
}
