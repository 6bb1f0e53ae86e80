//! # comptoir-store: Stateful Helpers for Comptoir
//!
//! The TTL cache and the rate limiter, plus the key-value store and clock
//! abstractions they depend on.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        comptoir-store                                   │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐                            │
//! │  │    TtlCache      │   │   RateLimiter    │                            │
//! │  │  read / write    │   │  is_allowed      │                            │
//! │  │  clear / expiry  │   │  remaining/reset │                            │
//! │  └────────┬─────────┘   └────────┬─────────┘                            │
//! │           │                      │                                      │
//! │  ┌────────▼─────────┐   ┌────────▼─────────┐                            │
//! │  │  KeyValueStore   │   │      Clock       │                            │
//! │  │ Memory / File    │   │ System / Manual  │                            │
//! │  └──────────────────┘   └──────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! A failing store never reaches the caller: the cache logs the error and
//! answers with its initial value, exactly like a cache miss.

pub mod cache;
pub mod clock;
pub mod error;
pub mod rate_limiter;
pub mod store;

pub use cache::{CacheEntry, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use rate_limiter::{RateLimitConfig, RateLimiter};
pub use store::{FileStore, KeyValueStore, MemoryStore};
