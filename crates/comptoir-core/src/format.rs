//! # Format Module
//!
//! Render-ready strings for money, numbers, dates, durations and names.
//!
//! ## Totality
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EVERY function in this module is TOTAL and DETERMINISTIC               │
//! │                                                                         │
//! │  Input                         Output                                   │
//! │  ─────                         ──────                                   │
//! │  format_currency(NaN)          "0,00 €"          (fixed fallback)       │
//! │  format_currency_in(1, "XYZ")  "1.00 XYZ"        (unsupported code)     │
//! │  format_date("garbage")        "Date invalide"   (sentinel)             │
//! │  format_duration(-5)           "0s"                                     │
//! │  format_file_size(-1)          "0 B"                                    │
//! │                                                                         │
//! │  Same input → same output, so callers may memoize freely               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The free functions default to French / EUR. [`Formatter`] binds a
//! configured locale and currency once and exposes the same operations.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::locale::{group_digits, Currency, Locale, NBSP};

/// Returned by the date formatters when the input is not a date.
pub const INVALID_DATE: &str = "Date invalide";

/// Returned by [`format_full_name`] when both parts are blank.
pub const MISSING_NAME: &str = "Nom non renseigné";

/// Default suffix appended by [`truncate_text`].
pub const DEFAULT_ELLIPSIS: &str = "...";

// =============================================================================
// Date Input
// =============================================================================

/// Date rendering style, mirroring the `dateStyle` presets of the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    Short,
    #[default]
    Medium,
    Long,
    Full,
}

/// Anything the date formatters accept.
///
/// Text is parsed leniently (RFC 3339, `YYYY-MM-DD[ HH:MM:SS]`,
/// `DD/MM/YYYY`); integers are epoch milliseconds. Zoned values are
/// rendered in their own offset.
pub trait DateInput {
    fn to_naive(&self) -> Option<NaiveDateTime>;
}

impl DateInput for str {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        let s = self.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }
        for pattern in [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
                return Some(dt);
            }
        }
        for pattern in ["%Y-%m-%d", "%d/%m/%Y"] {
            if let Ok(d) = NaiveDate::parse_from_str(s, pattern) {
                return d.and_hms_opt(0, 0, 0);
            }
        }
        None
    }
}

impl DateInput for String {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        self.as_str().to_naive()
    }
}

impl DateInput for NaiveDate {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        self.and_hms_opt(0, 0, 0)
    }
}

impl DateInput for NaiveDateTime {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        Some(*self)
    }
}

impl<Tz: TimeZone> DateInput for DateTime<Tz> {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        Some(self.naive_local())
    }
}

impl DateInput for i64 {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        DateTime::<Utc>::from_timestamp_millis(*self).map(|dt| dt.naive_utc())
    }
}

impl<T: DateInput + ?Sized> DateInput for &T {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        (**self).to_naive()
    }
}

impl<T: DateInput> DateInput for Option<T> {
    fn to_naive(&self) -> Option<NaiveDateTime> {
        self.as_ref().and_then(|d| d.to_naive())
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Formatting operations bound to one locale and currency.
///
/// ## Example
/// ```rust
/// use comptoir_core::format::Formatter;
/// use comptoir_core::locale::{Currency, Locale};
///
/// let fmt = Formatter::new(Locale::EnUs, Currency::Usd);
/// assert_eq!(fmt.currency(1234.5), "$1,234.50");
/// assert_eq!(fmt.percentage(0.125, 1), "12.5%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatter {
    locale: Locale,
    currency: Currency,
}

impl Formatter {
    pub const fn new(locale: Locale, currency: Currency) -> Self {
        Formatter { locale, currency }
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub const fn currency_code(&self) -> Currency {
        self.currency
    }

    /// Formats an amount of money; non-finite amounts render as zero.
    pub fn currency(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let digits = group_digits(amount.abs(), 2, self.locale);
        let negative = amount < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        let symbol = self.currency.symbol();

        if self.locale.currency_after() {
            format!("{}{}{}{}", sign, digits, NBSP, symbol)
        } else if symbol.chars().all(char::is_alphabetic) {
            format!("{}{}{}{}", sign, symbol, NBSP, digits)
        } else {
            format!("{}{}{}", sign, symbol, digits)
        }
    }

    /// Formats a plain number; non-finite input renders as `"0"`.
    pub fn number(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "0".to_string();
        }
        group_digits(value, decimals, self.locale)
    }

    /// Formats a 0–1 ratio as a percentage; non-finite input renders as `"0%"`.
    pub fn percentage(&self, ratio: f64, decimals: usize) -> String {
        if !ratio.is_finite() {
            return "0%".to_string();
        }
        format!(
            "{}{}%",
            group_digits(ratio * 100.0, decimals, self.locale),
            self.locale.percent_spacing()
        )
    }

    /// Formats a date; anything unparsable renders as [`INVALID_DATE`].
    pub fn date<D: DateInput + ?Sized>(&self, date: &D, style: DateStyle) -> String {
        match date.to_naive() {
            Some(dt) => render_date(&dt, style, self.locale),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Short date followed by the wall-clock time.
    pub fn date_time<D: DateInput + ?Sized>(&self, date: &D) -> String {
        match date.to_naive() {
            Some(dt) => format!(
                "{} {}",
                render_date(&dt, DateStyle::Short, self.locale),
                render_time(&dt, self.locale)
            ),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Human distance between `date` and `now` ("il y a 5 minutes").
    pub fn relative_time(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> String {
        render_relative(date, now, self.locale)
    }
}

// =============================================================================
// Money & Numbers
// =============================================================================

/// Formats an amount in euros for the French locale.
///
/// ## Example
/// ```rust
/// use comptoir_core::format::format_currency;
///
/// assert_eq!(format_currency(1234.5), "1\u{202f}234,50\u{a0}€");
/// assert_eq!(format_currency(f64::NAN), format_currency(0.0));
/// ```
pub fn format_currency(amount: f64) -> String {
    Formatter::default().currency(amount)
}

/// Formats an amount for an arbitrary currency code and locale tag.
///
/// ## Fallbacks
/// - non-finite amount → the zero amount of the requested pair
/// - unsupported locale or currency → `"{amount:.2} {currency}"`
pub fn format_currency_in(amount: f64, currency: &str, locale: &str) -> String {
    match (Locale::parse(locale), Currency::parse(currency)) {
        (Ok(locale), Ok(currency)) => Formatter::new(locale, currency).currency(amount),
        _ => {
            let amount = if amount.is_finite() { amount } else { 0.0 };
            format!("{:.2} {}", amount, currency)
        }
    }
}

/// Formats a number with `decimals` fraction digits (French separators).
pub fn format_number(value: f64, decimals: usize) -> String {
    Formatter::default().number(value, decimals)
}

/// Formats a number for a locale tag; unsupported tags use plain `{:.N}`.
pub fn format_number_in(value: f64, decimals: usize, locale: &str) -> String {
    match Locale::parse(locale) {
        Ok(locale) => Formatter::new(locale, Currency::default()).number(value, decimals),
        Err(_) if value.is_finite() => format!("{:.*}", decimals, value),
        Err(_) => "0".to_string(),
    }
}

/// Formats a 0–1 ratio as a percentage (French separators).
///
/// ```rust
/// use comptoir_core::format::format_percentage;
///
/// assert_eq!(format_percentage(0.256, 1), "25,6\u{202f}%");
/// assert_eq!(format_percentage(f64::INFINITY, 1), "0%");
/// ```
pub fn format_percentage(ratio: f64, decimals: usize) -> String {
    Formatter::default().percentage(ratio, decimals)
}

/// Formats a percentage for a locale tag; unsupported tags use `{:.N}%`.
pub fn format_percentage_in(ratio: f64, decimals: usize, locale: &str) -> String {
    match Locale::parse(locale) {
        Ok(locale) => Formatter::new(locale, Currency::default()).percentage(ratio, decimals),
        Err(_) if ratio.is_finite() => format!("{:.*}%", decimals, ratio * 100.0),
        Err(_) => "0%".to_string(),
    }
}

/// Formats a byte count with binary (1024-based) units.
///
/// Trailing fraction zeros are dropped, so `1024` renders as `"1 KB"` and
/// `1536` as `"1.5 KB"`. Values beyond the terabyte range stay in `TB`.
pub fn format_file_size(bytes: f64, decimals: usize) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }

    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024.0 && exponent < UNITS.len() - 1 {
        scaled /= 1024.0;
        exponent += 1;
    }

    let mut text = format!("{:.*}", decimals, scaled);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    format!("{} {}", text, UNITS[exponent])
}

/// Formats a duration in seconds as `"1h 1m 1s"`.
///
/// Zero-valued units are omitted, fractions of a second are dropped, and
/// `"0s"` is returned when nothing else would be printed.
///
/// ```rust
/// use comptoir_core::format::format_duration;
///
/// assert_eq!(format_duration(3661.0), "1h 1m 1s");
/// assert_eq!(format_duration(120.0), "2m");
/// assert_eq!(format_duration(-5.0), "0s");
/// ```
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0s".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

// =============================================================================
// Dates
// =============================================================================

/// Formats a date in French.
pub fn format_date<D: DateInput + ?Sized>(date: &D, style: DateStyle) -> String {
    Formatter::default().date(date, style)
}

/// Formats a date for a locale tag.
///
/// Unparsable dates give [`INVALID_DATE`]; an unsupported locale renders the
/// ISO `YYYY-MM-DD` form.
pub fn format_date_in<D: DateInput + ?Sized>(date: &D, style: DateStyle, locale: &str) -> String {
    match (date.to_naive(), Locale::parse(locale)) {
        (None, _) => INVALID_DATE.to_string(),
        (Some(dt), Ok(locale)) => render_date(&dt, style, locale),
        (Some(dt), Err(_)) => dt.format("%Y-%m-%d").to_string(),
    }
}

/// Formats a date with its time of day (French).
pub fn format_date_time<D: DateInput + ?Sized>(date: &D) -> String {
    Formatter::default().date_time(date)
}

/// Human distance between two instants (French).
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    Formatter::default().relative_time(date, now)
}

fn render_date(dt: &NaiveDateTime, style: DateStyle, locale: Locale) -> String {
    let (day, month, year) = (dt.day(), dt.month(), dt.year());
    let weekday = locale.weekday_name(dt.weekday().num_days_from_monday());

    match (locale, style) {
        (Locale::FrFr | Locale::EnGb, DateStyle::Short) => {
            format!("{:02}/{:02}/{}", day, month, year)
        }
        (Locale::EnUs, DateStyle::Short) => format!("{:02}/{:02}/{}", month, day, year),
        (Locale::DeDe, DateStyle::Short | DateStyle::Medium) => {
            format!("{:02}.{:02}.{}", day, month, year)
        }

        (Locale::FrFr | Locale::EnGb, DateStyle::Medium) => {
            format!("{} {} {}", day, locale.month_abbrev(month), year)
        }
        (Locale::EnUs, DateStyle::Medium) => {
            format!("{} {}, {}", locale.month_abbrev(month), day, year)
        }

        (Locale::FrFr | Locale::EnGb, DateStyle::Long) => {
            format!("{} {} {}", day, locale.month_name(month), year)
        }
        (Locale::EnUs, DateStyle::Long) => {
            format!("{} {}, {}", locale.month_name(month), day, year)
        }
        (Locale::DeDe, DateStyle::Long) => format!("{}. {} {}", day, locale.month_name(month), year),

        (Locale::FrFr, DateStyle::Full) => {
            format!("{} {} {} {}", weekday, day, locale.month_name(month), year)
        }
        (Locale::EnGb, DateStyle::Full) => {
            format!("{} {} {} {}", weekday, day, locale.month_name(month), year)
        }
        (Locale::EnUs, DateStyle::Full) => {
            format!("{}, {} {}, {}", weekday, locale.month_name(month), day, year)
        }
        (Locale::DeDe, DateStyle::Full) => {
            format!("{}, {}. {} {}", weekday, day, locale.month_name(month), year)
        }
    }
}

fn render_time(dt: &NaiveDateTime, locale: Locale) -> String {
    if locale.uses_12_hour_clock() {
        let (pm, hour) = dt.hour12();
        format!("{}:{:02} {}", hour, dt.minute(), if pm { "PM" } else { "AM" })
    } else {
        format!("{:02}:{:02}", dt.hour(), dt.minute())
    }
}

fn render_relative(date: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let delta = (date - now).num_seconds();
    let past = delta < 0;
    let secs = delta.unsigned_abs();

    if secs < 45 {
        return match locale {
            Locale::FrFr => "à l'instant",
            Locale::EnUs | Locale::EnGb => "just now",
            Locale::DeDe => "gerade eben",
        }
        .to_string();
    }

    // (count, unit index) where units are minute, hour, day, month, year
    let (count, unit) = match secs {
        s if s < 3_600 => ((s + 30) / 60, 0),
        s if s < 86_400 => ((s + 1_800) / 3_600, 1),
        s if s < 30 * 86_400 => ((s + 43_200) / 86_400, 2),
        s if s < 365 * 86_400 => (s / (30 * 86_400), 3),
        s => (s / (365 * 86_400), 4),
    };
    let count = count.max(1);
    let plural = count > 1;

    let unit_name = match locale {
        Locale::FrFr => {
            const ONE: [&str; 5] = ["minute", "heure", "jour", "mois", "an"];
            const MANY: [&str; 5] = ["minutes", "heures", "jours", "mois", "ans"];
            if plural { MANY[unit] } else { ONE[unit] }
        }
        Locale::EnUs | Locale::EnGb => {
            const ONE: [&str; 5] = ["minute", "hour", "day", "month", "year"];
            const MANY: [&str; 5] = ["minutes", "hours", "days", "months", "years"];
            if plural { MANY[unit] } else { ONE[unit] }
        }
        Locale::DeDe => {
            // dative forms, shared by "vor" and "in"
            const ONE: [&str; 5] = ["Minute", "Stunde", "Tag", "Monat", "Jahr"];
            const MANY: [&str; 5] = ["Minuten", "Stunden", "Tagen", "Monaten", "Jahren"];
            if plural { MANY[unit] } else { ONE[unit] }
        }
    };

    match (locale, past) {
        (Locale::FrFr, true) => format!("il y a {} {}", count, unit_name),
        (Locale::FrFr, false) => format!("dans {} {}", count, unit_name),
        (Locale::EnUs | Locale::EnGb, true) => format!("{} {} ago", count, unit_name),
        (Locale::EnUs | Locale::EnGb, false) => format!("in {} {}", count, unit_name),
        (Locale::DeDe, true) => format!("vor {} {}", count, unit_name),
        (Locale::DeDe, false) => format!("in {} {}", count, unit_name),
    }
}

// =============================================================================
// Text
// =============================================================================

/// Truncates `text` to `max_length` characters using `"..."`.
///
/// ```rust
/// use comptoir_core::format::truncate_text;
///
/// assert_eq!(truncate_text("Hello World", 5), "He...");
/// assert_eq!(truncate_text("Hi", 5), "Hi");
/// ```
pub fn truncate_text(text: &str, max_length: usize) -> String {
    truncate_text_with(text, max_length, DEFAULT_ELLIPSIS)
}

/// Truncates `text` so that the result, suffix included, is `max_length`
/// characters long. Lengths are counted in characters, not bytes.
pub fn truncate_text_with(text: &str, max_length: usize, suffix: &str) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Joins a first and last name, capitalised and trimmed.
///
/// ```rust
/// use comptoir_core::format::{format_full_name, MISSING_NAME};
///
/// assert_eq!(format_full_name("  jean ", "DUPONT"), "Jean Dupont");
/// assert_eq!(format_full_name("", "  "), MISSING_NAME);
/// ```
pub fn format_full_name(first_name: &str, last_name: &str) -> String {
    let parts: Vec<String> = [first_name, last_name]
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(capitalize)
        .collect();

    if parts.is_empty() {
        MISSING_NAME.to_string()
    } else {
        parts.join(" ")
    }
}

/// Groups a French phone number by pairs (`06 12 34 56 78`).
///
/// Spaces, dots and dashes are ignored on input. `+33` numbers keep their
/// prefix (`+33 6 12 34 56 78`). Anything else is returned trimmed.
pub fn format_phone_number(phone: &str) -> String {
    let compact: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .collect();

    let pairs = |digits: &str| -> String {
        digits
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    };

    if let Some(rest) = compact.strip_prefix("+33") {
        if rest.len() == 9 && rest.chars().all(|c| c.is_ascii_digit()) {
            return format!("+33 {} {}", &rest[..1], pairs(&rest[1..]));
        }
    } else if compact.len() == 10
        && compact.starts_with('0')
        && compact.chars().all(|c| c.is_ascii_digit())
    {
        return pairs(&compact);
    }

    phone.trim().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::NNBSP;

    #[test]
    fn test_currency_default_locale() {
        assert_eq!(format_currency(0.0), format!("0,00{}€", NBSP));
        assert_eq!(
            format_currency(1234.5),
            format!("1{}234,50{}€", NNBSP, NBSP)
        );
        assert_eq!(format_currency(-12.3), format!("-12,30{}€", NBSP));
    }

    #[test]
    fn test_currency_non_finite_fallback() {
        let fallback = format_currency(0.0);
        assert_eq!(format_currency(f64::NAN), fallback);
        assert_eq!(format_currency(f64::INFINITY), fallback);
        assert_eq!(format_currency(f64::NEG_INFINITY), fallback);
    }

    #[test]
    fn test_currency_other_locales() {
        assert_eq!(format_currency_in(1234.5, "USD", "en-US"), "$1,234.50");
        assert_eq!(format_currency_in(-5.0, "GBP", "en-GB"), "-£5.00");
        assert_eq!(
            format_currency_in(1234.5, "EUR", "de-DE"),
            format!("1.234,50{}€", NBSP)
        );
        assert_eq!(
            format_currency_in(10.0, "CHF", "en-US"),
            format!("CHF{}10.00", NBSP)
        );
    }

    #[test]
    fn test_currency_unsupported_pair() {
        assert_eq!(format_currency_in(12.5, "XYZ", "fr-FR"), "12.50 XYZ");
        assert_eq!(format_currency_in(3.0, "EUR", "zz-ZZ"), "3.00 EUR");
        assert_eq!(format_currency_in(f64::NAN, "XYZ", "fr-FR"), "0.00 XYZ");
    }

    #[test]
    fn test_number() {
        assert_eq!(format_number(1234567.891, 0), format!("1{0}234{0}568", NNBSP));
        assert_eq!(format_number(3.14159, 2), "3,14");
        assert_eq!(format_number(f64::NAN, 2), "0");
        assert_eq!(format_number_in(1234.5, 1, "en-US"), "1,234.5");
        assert_eq!(format_number_in(1234.5, 1, "??"), "1234.5");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(0.5, 0), format!("50{}%", NNBSP));
        assert_eq!(format_percentage_in(0.256, 1, "en-US"), "25.6%");
        assert_eq!(format_percentage(f64::NAN, 1), "0%");
        assert_eq!(format_percentage_in(f64::NEG_INFINITY, 1, "en-US"), "0%");
    }

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(0.0, 1), "0 B");
        assert_eq!(format_file_size(-10.0, 1), "0 B");
        assert_eq!(format_file_size(f64::NAN, 1), "0 B");
        assert_eq!(format_file_size(500.0, 1), "500 B");
        assert_eq!(format_file_size(1024.0, 1), "1 KB");
        assert_eq!(format_file_size(1536.0, 1), "1.5 KB");
        assert_eq!(format_file_size(1024.0 * 1024.0 * 3.25, 2), "3.25 MB");
        assert_eq!(format_file_size(1024f64.powi(5) * 2.0, 1), "2048 TB");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
        assert_eq!(format_duration(-5.0), "0s");
        assert_eq!(format_duration(f64::NAN), "0s");
        assert_eq!(format_duration(3600.0), "1h");
        assert_eq!(format_duration(3601.0), "1h 1s");
        assert_eq!(format_duration(59.9), "59s");
    }

    #[test]
    fn test_date_styles_french() {
        let date = "2024-01-15";
        assert_eq!(format_date(date, DateStyle::Short), "15/01/2024");
        assert_eq!(format_date(date, DateStyle::Medium), "15 janv. 2024");
        assert_eq!(format_date(date, DateStyle::Long), "15 janvier 2024");
        assert_eq!(format_date(date, DateStyle::Full), "lundi 15 janvier 2024");
    }

    #[test]
    fn test_date_styles_other_locales() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date_in(&date, DateStyle::Short, "en-US"), "03/05/2024");
        assert_eq!(format_date_in(&date, DateStyle::Medium, "en-US"), "Mar 5, 2024");
        assert_eq!(
            format_date_in(&date, DateStyle::Full, "en-US"),
            "Tuesday, March 5, 2024"
        );
        assert_eq!(format_date_in(&date, DateStyle::Long, "de-DE"), "5. März 2024");
        assert_eq!(format_date_in(&date, DateStyle::Medium, "en-GB"), "5 Mar 2024");
        assert_eq!(format_date_in(&date, DateStyle::Long, "xx"), "2024-03-05");
    }

    #[test]
    fn test_date_inputs() {
        assert_eq!(format_date("2024-01-15T10:30:00Z", DateStyle::Short), "15/01/2024");
        assert_eq!(format_date("15/01/2024", DateStyle::Short), "15/01/2024");
        assert_eq!(format_date(&1_705_276_800_000i64, DateStyle::Short), "15/01/2024");
        let owned = String::from("2024-01-15 08:00:00");
        assert_eq!(format_date(&owned, DateStyle::Short), "15/01/2024");
    }

    #[test]
    fn test_invalid_date() {
        assert_eq!(format_date("not a date", DateStyle::Short), INVALID_DATE);
        assert_eq!(format_date("", DateStyle::Long), INVALID_DATE);
        assert_eq!(format_date("2024-13-45", DateStyle::Long), INVALID_DATE);
        assert_eq!(format_date(&None::<String>, DateStyle::Long), INVALID_DATE);
        assert_eq!(format_date_time("??"), INVALID_DATE);
    }

    #[test]
    fn test_date_time() {
        assert_eq!(format_date_time("2024-01-15T14:05:00"), "15/01/2024 14:05");
        let fmt = Formatter::new(Locale::EnUs, Currency::Usd);
        assert_eq!(fmt.date_time("2024-01-15T14:05:00"), "01/15/2024 2:05 PM");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let five_min_ago = now - chrono::Duration::minutes(5);
        let in_two_days = now + chrono::Duration::days(2);

        assert_eq!(format_relative_time(now, now), "à l'instant");
        assert_eq!(format_relative_time(five_min_ago, now), "il y a 5 minutes");
        assert_eq!(format_relative_time(in_two_days, now), "dans 2 jours");
        assert_eq!(
            format_relative_time(now - chrono::Duration::hours(1), now),
            "il y a 1 heure"
        );

        let en = Formatter::new(Locale::EnUs, Currency::Usd);
        assert_eq!(en.relative_time(five_min_ago, now), "5 minutes ago");
        assert_eq!(en.relative_time(in_two_days, now), "in 2 days");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_text("Hello World", 5), "He...");
        assert_eq!(truncate_text("Hello", 5), "Hello");
        assert_eq!(truncate_text("", 0), "");
        assert_eq!(truncate_text_with("Bonjour à tous", 9, "…"), "Bonjour …");
        assert_eq!(truncate_text("Hello World", 2), "...");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hELLo"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élodie"), "Élodie");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(format_full_name("marie", "curie"), "Marie Curie");
        assert_eq!(format_full_name("", "curie"), "Curie");
        assert_eq!(format_full_name("  ", ""), MISSING_NAME);
    }

    #[test]
    fn test_phone_number() {
        assert_eq!(format_phone_number("0612345678"), "06 12 34 56 78");
        assert_eq!(format_phone_number("06.12.34.56.78"), "06 12 34 56 78");
        assert_eq!(format_phone_number("+33612345678"), "+33 6 12 34 56 78");
        assert_eq!(format_phone_number("  12345 "), "12345");
    }

    #[test]
    fn test_referential_transparency() {
        for value in [0.0, 1.5, -3.25, f64::NAN, 1e9] {
            assert_eq!(format_currency(value), format_currency(value));
            assert_eq!(format_number(value, 2), format_number(value, 2));
        }
    }
}
