//! # TTL Cache
//!
//! One typed value persisted under one key, with an optional expiry.
//!
//! ## Entry Lifecycle
//! ```text
//! write(v) ──► store["key"] = {"value": v, "timestamp": now}
//!
//! read()   ──► entry missing ─────────────────────────► initial
//!          ──► now - timestamp >  expiration ─► purge ─► initial
//!          ──► now - timestamp <= expiration ─────────► value
//!
//! clear()  ──► remove store["key"]          (next read ► initial)
//! ```
//!
//! Store failures and undecodable entries are logged with `warn!` and
//! behave like a missing entry; the cache never returns an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::store::KeyValueStore;

/// Persisted form of a cached value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    /// Epoch milliseconds of the write.
    pub timestamp: i64,
}

impl<T> CacheEntry<T> {
    /// `false` when there is no expiration.
    pub fn is_expired(&self, now_ms: i64, expiration_ms: Option<i64>) -> bool {
        match expiration_ms {
            Some(expiration) => now_ms.saturating_sub(self.timestamp) > expiration,
            None => false,
        }
    }
}

/// Typed cache slot over a [`KeyValueStore`].
///
/// ## Example
/// ```rust
/// use comptoir_store::{MemoryStore, TtlCache};
///
/// let cache = TtlCache::new(MemoryStore::new(), "dashboard.range", 7u32)
///     .with_expiration(300_000);
/// assert_eq!(cache.read(), 7);
/// cache.write(&30);
/// assert_eq!(cache.read(), 30);
/// cache.clear();
/// assert_eq!(cache.read(), 7);
/// ```
#[derive(Debug)]
pub struct TtlCache<T, S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
    initial: T,
    expiration_ms: Option<i64>,
}

impl<T, S> TtlCache<T, S, SystemClock>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStore,
{
    /// Cache without expiration, on the system clock.
    pub fn new(store: S, key: impl Into<String>, initial: T) -> Self {
        TtlCache {
            store,
            clock: SystemClock,
            key: key.into(),
            initial,
            expiration_ms: None,
        }
    }
}

impl<T, S, C> TtlCache<T, S, C>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStore,
    C: Clock,
{
    /// Entries older than `expiration_ms` are discarded on read.
    pub fn with_expiration(mut self, expiration_ms: i64) -> Self {
        self.expiration_ms = Some(expiration_ms.max(0));
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> TtlCache<T, S, C2> {
        TtlCache {
            store: self.store,
            clock,
            key: self.key,
            initial: self.initial,
            expiration_ms: self.expiration_ms,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn initial(&self) -> &T {
        &self.initial
    }

    pub fn expiration_ms(&self) -> Option<i64> {
        self.expiration_ms
    }

    /// Current value, or the initial value when missing, expired or
    /// unreadable. An expired entry is removed from the store.
    pub fn read(&self) -> T {
        let Some(entry) = self.load() else {
            return self.initial.clone();
        };

        if entry.is_expired(self.clock.now_ms(), self.expiration_ms) {
            debug!(key = %self.key, "Cache entry expired, purging");
            self.remove_persisted();
            return self.initial.clone();
        }

        entry.value
    }

    /// Stores `value` stamped with the current time.
    ///
    /// Returns `false` when the store rejected the write.
    pub fn write(&self, value: &T) -> bool {
        let entry = CacheEntry {
            value,
            timestamp: self.clock.now_ms(),
        };

        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to encode cache entry");
                return false;
            }
        };

        match self.store.set(&self.key, &json) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to persist cache entry");
                false
            }
        }
    }

    /// Drops the persisted entry; the next read yields the initial value.
    pub fn clear(&self) {
        self.remove_persisted();
    }

    /// Whether a persisted entry exists and is past its expiration.
    pub fn is_expired(&self) -> bool {
        self.load()
            .is_some_and(|entry| entry.is_expired(self.clock.now_ms(), self.expiration_ms))
    }

    fn load(&self) -> Option<CacheEntry<T>> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read cache entry");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    fn remove_persisted(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, error = %e, "Failed to remove cache entry");
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
    use crate::error::{StoreError, StoreResult};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    /// Store whose every operation fails, like storage disabled in a
    /// private browsing window.
    struct DisabledStore;

    impl KeyValueStore for DisabledStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Unavailable("disabled".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("disabled".into()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("disabled".into()))
        }
    }

    fn cache_with(
        store: Arc<MemoryStore>,
        clock: ManualClock,
    ) -> TtlCache<Vec<String>, Arc<MemoryStore>, ManualClock> {
        TtlCache::new(store, "recent.searches", Vec::new())
            .with_expiration(1_000)
            .with_clock(clock)
    }

    #[test]
    fn test_read_before_expiry_returns_written_value() {
        let clock = ManualClock::new(10_000);
        let cache = cache_with(Arc::new(MemoryStore::new()), clock.clone());

        assert!(cache.write(&vec!["savon".to_string()]));
        clock.advance(1_000);
        assert_eq!(cache.read(), vec!["savon".to_string()]);
        assert!(!cache.is_expired());
    }

    #[test]
    fn test_read_after_expiry_purges() {
        let clock = ManualClock::new(10_000);
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(Arc::clone(&store), clock.clone());

        cache.write(&vec!["bougie".to_string()]);
        clock.advance(1_001);
        assert!(cache.is_expired());
        assert!(cache.read().is_empty());
        assert_eq!(store.get("recent.searches").unwrap(), None);
    }

    #[test]
    fn test_entry_format() {
        let clock = ManualClock::new(42);
        let store = Arc::new(MemoryStore::new());
        let cache = TtlCache::new(Arc::clone(&store), "n", 0i32).with_clock(clock);
        cache.write(&5);
        let raw = store.get("n").unwrap().unwrap();
        assert_eq!(raw, r#"{"value":5,"timestamp":42}"#);
    }

    #[test]
    fn test_no_expiration_never_expires() {
        let clock = ManualClock::new(0);
        let cache = TtlCache::new(MemoryStore::new(), "theme", "light".to_string())
            .with_clock(clock.clone());
        cache.write(&"dark".to_string());
        clock.advance(i64::MAX / 2);
        assert_eq!(cache.read(), "dark");
    }

    #[test]
    fn test_clear_resets_to_initial() {
        let store = Arc::new(MemoryStore::new());
        let cache = TtlCache::new(Arc::clone(&store), "page", 1u32);
        cache.write(&4);
        cache.clear();
        assert_eq!(cache.read(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_undecodable_entry_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        store.set("page", "not json").unwrap();
        let cache = TtlCache::new(Arc::clone(&store), "page", 1u32);
        assert_eq!(cache.read(), 1);
    }

    #[test]
    fn test_store_failures_are_soft() {
        let cache = TtlCache::new(DisabledStore, "page", 3u32).with_expiration(10);
        assert!(!cache.write(&9));
        assert_eq!(cache.read(), 3);
        assert!(!cache.is_expired());
        cache.clear();
    }
}
