//! # Comptoir Configuration
//!
//! Display, listing, timing, cache and rate-limit settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COMPTOIR_LOCALE=en-US                                              │
//! │     COMPTOIR_PAGE_SIZE=50                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/comptoir/comptoir.toml (Linux)                           │
//! │     ~/Library/Application Support/fr.comptoir.comptoir/ (macOS)        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     fr-FR, EUR, 20 rows per page                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # comptoir.toml
//! [display]
//! locale = "fr-FR"
//! currency = "EUR"
//!
//! [listing]
//! page_size = 20
//! filter_min_chars = 3
//!
//! [timing]
//! search_debounce_ms = 300
//! throttle_ms = 1000
//!
//! [cache]
//! expiration_ms = 300000
//!
//! [rate_limit]
//! max_attempts = 10
//! window_ms = 60000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use comptoir_core::format::Formatter;
use comptoir_core::locale::{Currency, Locale};
use comptoir_store::RateLimitConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{RuntimeError, RuntimeResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "comptoir.toml";

// =============================================================================
// Display Settings
// =============================================================================

/// How amounts and dates are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// BCP-47 tag, one of the supported locales.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// ISO-4217 code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_locale() -> String {
    Locale::default().tag().to_string()
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            locale: default_locale(),
            currency: default_currency(),
        }
    }
}

// =============================================================================
// Listing Settings
// =============================================================================

/// Pagination and search-box behaviour of list screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSettings {
    /// Rows per page. Must be greater than 0.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Queries shorter than this (in characters) do not filter.
    #[serde(default = "default_filter_min_chars")]
    pub filter_min_chars: usize,
}

fn default_page_size() -> usize {
    comptoir_core::DEFAULT_PAGE_SIZE
}

fn default_filter_min_chars() -> usize {
    comptoir_core::DEFAULT_FILTER_MIN_CHARS
}

impl Default for ListingSettings {
    fn default() -> Self {
        ListingSettings {
            page_size: default_page_size(),
            filter_min_chars: default_filter_min_chars(),
        }
    }
}

// =============================================================================
// Timing Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Quiet period before a search query is applied.
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,

    /// Minimum interval between two runs of a throttled action.
    #[serde(default = "default_throttle")]
    pub throttle_ms: u64,
}

fn default_search_debounce() -> u64 {
    300
}

fn default_throttle() -> u64 {
    1_000
}

impl Default for TimingSettings {
    fn default() -> Self {
        TimingSettings {
            search_debounce_ms: default_search_debounce(),
            throttle_ms: default_throttle(),
        }
    }
}

// =============================================================================
// Cache Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Age after which a cached entry is discarded. 0 disables expiry.
    #[serde(default = "default_expiration")]
    pub expiration_ms: i64,
}

fn default_expiration() -> i64 {
    5 * 60_000
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            expiration_ms: default_expiration(),
        }
    }
}

// =============================================================================
// Rate Limit Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_window")]
    pub window_ms: i64,
}

fn default_max_attempts() -> u32 {
    RateLimitConfig::default().max_attempts
}

fn default_window() -> i64 {
    RateLimitConfig::default().window_ms
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        RateLimitSettings {
            max_attempts: default_max_attempts(),
            window_ms: default_window(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
///
/// Every section and every key is optional in the file; missing values take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComptoirConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub listing: ListingSettings,

    #[serde(default)]
    pub timing: TimingSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

impl ComptoirConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (comptoir.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RuntimeResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads a TOML file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> RuntimeResult<Self> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration as pretty TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> RuntimeResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| RuntimeError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates ranges and the locale/currency pair.
    pub fn validate(&self) -> RuntimeResult<()> {
        Locale::parse(&self.display.locale)
            .map_err(|e| RuntimeError::InvalidConfig(e.to_string()))?;
        Currency::parse(&self.display.currency)
            .map_err(|e| RuntimeError::InvalidConfig(e.to_string()))?;

        if self.listing.page_size == 0 {
            return Err(RuntimeError::InvalidConfig(
                "page_size must be greater than 0".into(),
            ));
        }
        if self.rate_limit.max_attempts == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_attempts must be greater than 0".into(),
            ));
        }
        if self.rate_limit.window_ms <= 0 {
            return Err(RuntimeError::InvalidConfig(
                "window_ms must be greater than 0".into(),
            ));
        }
        if self.cache.expiration_ms < 0 {
            return Err(RuntimeError::InvalidConfig(
                "expiration_ms must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies `COMPTOIR_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers are logged and ignored; locale and currency are
    /// checked later by [`validate`](Self::validate).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup("COMPTOIR_LOCALE") {
            debug!(locale = %locale, "Overriding locale from environment");
            self.display.locale = locale;
        }

        if let Some(currency) = lookup("COMPTOIR_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.display.currency = currency;
        }

        if let Some(size) = parse_override(&lookup, "COMPTOIR_PAGE_SIZE") {
            self.listing.page_size = size;
        }

        if let Some(max) = parse_override(&lookup, "COMPTOIR_RATE_LIMIT_MAX") {
            self.rate_limit.max_attempts = max;
        }

        if let Some(window) = parse_override(&lookup, "COMPTOIR_RATE_LIMIT_WINDOW_MS") {
            self.rate_limit.window_ms = window;
        }

        if let Some(expiration) = parse_override(&lookup, "COMPTOIR_CACHE_EXPIRATION_MS") {
            self.cache.expiration_ms = expiration;
        }

        if let Some(delay) = parse_override(&lookup, "COMPTOIR_SEARCH_DEBOUNCE_MS") {
            self.timing.search_debounce_ms = delay;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("fr", "comptoir", "comptoir")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Formatter for the configured locale and currency.
    ///
    /// Unsupported values fall back to `fr-FR` / `EUR`.
    pub fn formatter(&self) -> Formatter {
        Formatter::new(
            Locale::parse(&self.display.locale).unwrap_or_default(),
            Currency::parse(&self.display.currency).unwrap_or_default(),
        )
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_attempts: self.rate_limit.max_attempts,
            window_ms: self.rate_limit.window_ms,
        }
    }

    /// Cache expiration, `None` when expiry is disabled.
    pub fn cache_expiration_ms(&self) -> Option<i64> {
        (self.cache.expiration_ms > 0).then_some(self.cache.expiration_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.timing.search_debounce_ms)
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.timing.throttle_ms)
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            debug!(key, value = %raw, "Overriding setting from environment");
            Some(value)
        }
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}
