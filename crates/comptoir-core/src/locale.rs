//! # Locale Module
//!
//! The small, fixed set of locales and currencies Comptoir renders.
//!
//! ## Why Not ICU?
//! The shop runs in a handful of European locales. Every rule needed to
//! render money, numbers and dates for them fits in the tables below, which
//! keeps `comptoir-core` free of heavy data dependencies and keeps output
//! byte-for-byte stable across platforms.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Locale   Number        Currency        Percent   Short date            │
//! │  ───────  ────────────  ──────────────  ────────  ──────────            │
//! │  fr-FR    1 234,5       1 234,50 €      12,5 %    15/01/2024            │
//! │  en-US    1,234.5       €1,234.50       12.5%     01/15/2024            │
//! │  en-GB    1,234.5       €1,234.50       12.5%     15/01/2024            │
//! │  de-DE    1.234,5       1.234,50 €      12,5 %    15.01.2024            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! (fr-FR groups with U+202F, currency/percent spacing uses U+00A0 / U+202F)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Narrow no-break space (fr-FR digit grouping and percent sign).
pub(crate) const NNBSP: &str = "\u{202f}";
/// No-break space (between amount and currency symbol).
pub(crate) const NBSP: &str = "\u{a0}";

// =============================================================================
// Locale
// =============================================================================

/// A supported display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    /// Parses a BCP-47 tag (`fr-FR`, `fr_fr`, `fr`, ...).
    ///
    /// ## Example
    /// ```rust
    /// use comptoir_core::locale::Locale;
    ///
    /// assert_eq!(Locale::parse("fr-FR").unwrap(), Locale::FrFr);
    /// assert_eq!(Locale::parse("en_us").unwrap(), Locale::EnUs);
    /// assert!(Locale::parse("xx-YY").is_err());
    /// ```
    pub fn parse(tag: &str) -> CoreResult<Self> {
        match tag.trim().replace('_', "-").to_lowercase().as_str() {
            "fr" | "fr-fr" => Ok(Locale::FrFr),
            "en" | "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "de" | "de-de" => Ok(Locale::DeDe),
            _ => Err(CoreError::UnsupportedLocale(tag.to_string())),
        }
    }

    /// Canonical BCP-47 tag.
    pub const fn tag(&self) -> &'static str {
        match self {
            Locale::FrFr => "fr-FR",
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
        }
    }

    pub(crate) const fn decimal_separator(&self) -> &'static str {
        match self {
            Locale::FrFr | Locale::DeDe => ",",
            Locale::EnUs | Locale::EnGb => ".",
        }
    }

    pub(crate) const fn group_separator(&self) -> &'static str {
        match self {
            Locale::FrFr => NNBSP,
            Locale::DeDe => ".",
            Locale::EnUs | Locale::EnGb => ",",
        }
    }

    /// Text placed between the number and `%`.
    pub(crate) const fn percent_spacing(&self) -> &'static str {
        match self {
            Locale::FrFr => NNBSP,
            Locale::DeDe => NBSP,
            Locale::EnUs | Locale::EnGb => "",
        }
    }

    /// Whether the currency symbol goes after the amount.
    pub(crate) const fn currency_after(&self) -> bool {
        matches!(self, Locale::FrFr | Locale::DeDe)
    }

    pub(crate) const fn uses_12_hour_clock(&self) -> bool {
        matches!(self, Locale::EnUs)
    }

    /// Full month name, `month` in 1..=12.
    pub(crate) fn month_name(&self, month: u32) -> &'static str {
        const FR: [&str; 12] = [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
            "septembre", "octobre", "novembre", "décembre",
        ];
        const EN: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        const DE: [&str; 12] = [
            "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
            "September", "Oktober", "November", "Dezember",
        ];
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::FrFr => FR[idx],
            Locale::EnUs | Locale::EnGb => EN[idx],
            Locale::DeDe => DE[idx],
        }
    }

    /// Abbreviated month name, `month` in 1..=12.
    pub(crate) fn month_abbrev(&self, month: u32) -> &'static str {
        const FR: [&str; 12] = [
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
            "nov.", "déc.",
        ];
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        const DE: [&str; 12] = [
            "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.",
            "Nov.", "Dez.",
        ];
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::FrFr => FR[idx],
            Locale::EnUs | Locale::EnGb => EN[idx],
            Locale::DeDe => DE[idx],
        }
    }

    /// Weekday name, `day` counted from Monday = 0.
    pub(crate) fn weekday_name(&self, day: u32) -> &'static str {
        const FR: [&str; 7] = [
            "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
        ];
        const EN: [&str; 7] = [
            "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
        ];
        const DE: [&str; 7] = [
            "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
        ];
        let idx = (day % 7) as usize;
        match self {
            Locale::FrFr => FR[idx],
            Locale::EnUs | Locale::EnGb => EN[idx],
            Locale::DeDe => DE[idx],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

// =============================================================================
// Currency
// =============================================================================

/// A supported ISO-4217 currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Chf,
}

impl Currency {
    /// Parses an ISO-4217 code, case-insensitively.
    pub fn parse(code: &str) -> CoreResult<Self> {
        match code.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "GBP" => Ok(Currency::Gbp),
            "CHF" => Ok(Currency::Chf),
            _ => Err(CoreError::UnsupportedCurrency(code.to_string())),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Chf => "CHF",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::parse(s)
    }
}

// =============================================================================
// Number Rendering
// =============================================================================

/// Renders a finite number with fixed decimals and locale separators.
///
/// Negative zero (e.g. `-0.001` at 2 decimals) is rendered without a sign.
pub(crate) fn group_digits(value: f64, decimals: usize, locale: Locale) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let sep = locale.group_separator();
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3 * sep.len());
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(sep);
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push_str(locale.decimal_separator());
        grouped.push_str(frac);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
