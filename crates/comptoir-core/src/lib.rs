//! # comptoir-core: Pure Calculation Kernel for Comptoir
//!
//! This crate holds the money math, display formatting, list shaping and
//! input validation of Comptoir as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comptoir Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front-end / comptoir-report (consumers)            │   │
//! │  │    Sales list ──► Statistics ──► Product sheet ──► Forms        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          comptoir-runtime (debounce, throttle, config)          │   │
//! │  │          comptoir-store   (TTL cache, rate limiter)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comptoir-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │calculation│  │  format   │  │  shaping  │  │ validation│   │   │
//! │  │   │  profit   │  │ currency  │  │ paginate  │  │  schemas  │   │   │
//! │  │   │  margin   │  │  dates    │  │ filter    │  │  rules    │   │   │
//! │  │   │  stats    │  │  text     │  │ sort      │  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO TIMERS • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculation`] - Profit, margin, total cost, sales statistics
//! - [`format`] - Currency, number, date, duration and text rendering
//! - [`locale`] - Supported locales and currencies
//! - [`shaping`] - Pagination, filtering, sorting, visibility trigger
//! - [`validation`] - Field rules and entity schemas
//! - [`types`] - Domain records (Product, Sale, Client, Loan)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, so results can be memoized
//! 2. **No I/O**: stores, clocks and timers live in the outer crates
//! 3. **Total**: invalid numbers give a documented sentinel, never a panic
//! 4. **Explicit Errors**: schema failures are typed field violations
//!
//! ## Example Usage
//!
//! ```rust
//! use comptoir_core::calculation::{calculate_sales_statistics, ProfitCalculationInput};
//! use comptoir_core::format::format_currency;
//!
//! let sales = [
//!     ProfitCalculationInput::new(100.0, 60.0, 2.0),
//!     ProfitCalculationInput::new(200.0, 120.0, 1.0),
//! ];
//! let stats = calculate_sales_statistics(&sales);
//! assert_eq!(stats.total_profit(), 160.0);
//! assert_eq!(format_currency(stats.average_profit()), "80,00\u{a0}€");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculation;
pub mod error;
pub mod format;
pub mod locale;
pub mod shaping;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculation::{
    calculate_margin, calculate_profit, calculate_recommended_price, calculate_sales_statistics,
    calculate_total_cost, validate_calculation_input, PricedLine, SalesStatistics,
};
pub use error::{CoreError, CoreResult, FieldViolation, ValidationError, ValidationErrors};
pub use format::{DateStyle, Formatter};
pub use locale::{Currency, Locale};
pub use shaping::{filter_items, paginate, sort_items, Page, Paginator, SortOrder};
pub use types::*;
pub use validation::Schema;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rows per page on list screens.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Characters typed before a search filter kicks in.
pub const DEFAULT_FILTER_MIN_CHARS: usize = shaping::DEFAULT_MIN_CHARS;

/// Margin suggested on the product sheet when none is entered.
pub const DEFAULT_DESIRED_MARGIN: f64 = 30.0;
