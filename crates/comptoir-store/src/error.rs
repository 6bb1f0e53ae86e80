//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / poisoned lock                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← returned by KeyValueStore                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TtlCache / RateLimiter ← log with `warn!`, fall back to defaults       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Nothing above the store ever sees these as hard failures.

use thiserror::Error;

/// Key-value store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file could not be read or written.
    ///
    /// ## When This Occurs
    /// - Directory missing or read-only
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored text is not valid JSON for the requested type.
    #[error("Stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A thread panicked while holding the store lock.
    #[error("Store lock poisoned")]
    Poisoned,

    /// Storage is disabled or not reachable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
