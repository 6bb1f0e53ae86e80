//! # Data Shaping
//!
//! Pure helpers the list screens compose: filter → sort → paginate.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     List Screen Pipeline                                │
//! │                                                                         │
//! │  records from REST ──► filter_items ──► sort_items ──► paginate ──► UI  │
//! │                        (query ≥ 3)      (stable)       (clamped)        │
//! │                                                                         │
//! │  VisibilityTrigger ──► "load more" when the sentinel row scrolls in     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field access is explicit: callers pass accessor functions instead of
//! field names, so every lookup is type-checked.
//!
//! The timer-based shapers (debounce, throttle) live in `comptoir-runtime`
//! and the TTL cache in `comptoir-store`, since both need a clock.

pub mod filter;
pub mod pagination;
pub mod sort;
pub mod visibility;

pub use filter::{filter_items, FieldAccessor, FieldValue, DEFAULT_MIN_CHARS};
pub use pagination::{paginate, Page, Paginator};
pub use sort::{compare_text, sort_items, SortKey, SortOrder, SortValue};
pub use visibility::VisibilityTrigger;
