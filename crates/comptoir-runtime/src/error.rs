//! # Runtime Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Runtime Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────────────┐        ┌─────────────────────────┐         │
//! │  │     Configuration       │        │        Timers           │         │
//! │  │                         │        │                         │         │
//! │  │  Io / TomlParse         │        │  NoRuntime              │         │
//! │  │  TomlSerialize          │        │                         │         │
//! │  │  InvalidConfig          │        │                         │         │
//! │  └─────────────────────────┘        └─────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors raised while loading configuration or creating timers.
#[derive(Debug, Error)]
pub enum RuntimeError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Config file could not be read or written.
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `ComptoirConfig`.
    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Config values are out of range or unsupported.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Timer Errors
    // =========================================================================
    /// Timers were requested outside of a Tokio runtime.
    #[error("No Tokio runtime available for timers")]
    NoRuntime,
}
