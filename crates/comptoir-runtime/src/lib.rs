//! # comptoir-runtime: Timers, Configuration and Telemetry
//!
//! The parts of Comptoir that need a Tokio runtime or the process
//! environment.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        comptoir-runtime                                 │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │    debounce      │   │    throttle      │   │     config       │     │
//! │  │ DebouncedCallback│   │ThrottledCallback │   │  ComptoirConfig  │     │
//! │  │ DebouncedValue   │   │                  │   │ file → env       │     │
//! │  └────────┬─────────┘   └────────┬─────────┘   └──────────────────┘     │
//! │           │                      │                                      │
//! │  ┌────────▼──────────────────────▼─────────┐   ┌──────────────────┐     │
//! │  │               scheduler                 │   │    telemetry     │     │
//! │  │   TokioScheduler / ScheduledTask        │   │  init_tracing    │     │
//! │  └─────────────────────────────────────────┘   └──────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use comptoir_runtime::ComptoirConfig;
//!
//! let config = ComptoirConfig::default();
//! assert_eq!(config.formatter().currency(80.0), "80,00\u{a0}€");
//! assert_eq!(config.rate_limit().max_attempts, 10);
//! ```

pub mod config;
pub mod debounce;
pub mod error;
pub mod scheduler;
pub mod telemetry;
pub mod throttle;

pub use config::ComptoirConfig;
pub use debounce::{DebouncedCallback, DebouncedValue};
pub use error::{RuntimeError, RuntimeResult};
pub use scheduler::{Job, ScheduledTask, Scheduler, TokioScheduler};
pub use telemetry::init_tracing;
pub use throttle::ThrottledCallback;
