//! # Substring Filter
//!
//! Case-insensitive search across several fields of a record.
//!
//! The query is compared against each field returned by the caller's
//! accessors; a record matches when ANY field contains the query. Numbers
//! match on their decimal rendering (`12.5` matches the query `"2.5"`).
//!
//! Queries shorter than `min_chars` (counted in characters, untrimmed)
//! leave the list unchanged, so the UI does not flicker on every keystroke.

use std::borrow::Cow;

/// Minimum query length before a filter applies.
pub const DEFAULT_MIN_CHARS: usize = 3;

/// A searchable field value extracted from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
    /// Field absent on this record; never matches.
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Borrowed text field.
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    /// Optional text field, `Missing` when `None`.
    pub fn opt_text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::text)
    }

    fn contains(&self, needle_lower: &str) -> bool {
        match self {
            FieldValue::Text(text) => text.to_lowercase().contains(needle_lower),
            FieldValue::Number(n) => n.to_string().to_lowercase().contains(needle_lower),
            FieldValue::Missing => false,
        }
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

/// Accessor extracting one searchable field from a record.
pub type FieldAccessor<T> = for<'a> fn(&'a T) -> FieldValue<'a>;

/// Filters `items` by `query` across `fields`.
///
/// Returns every item (in order) when the query has fewer than
/// `min_chars` characters or when no field accessor is given.
///
/// ## Example
/// ```rust
/// use comptoir_core::shaping::filter::{filter_items, FieldAccessor, FieldValue};
///
/// struct Row { name: String, price: f64 }
/// fn name(row: &Row) -> FieldValue<'_> { FieldValue::text(&row.name) }
/// fn price(row: &Row) -> FieldValue<'_> { FieldValue::Number(row.price) }
///
/// let rows = vec![
///     Row { name: "Savon".into(), price: 4.5 },
///     Row { name: "Bougie".into(), price: 12.0 },
/// ];
/// let fields: [FieldAccessor<Row>; 2] = [name, price];
///
/// assert_eq!(filter_items(&rows, "SAV", &fields, 3).len(), 1);
/// assert_eq!(filter_items(&rows, "4.5", &fields, 3).len(), 1);
/// assert_eq!(filter_items(&rows, "sa", &fields, 3).len(), 2);
/// ```
pub fn filter_items<'t, T>(
    items: &'t [T],
    query: &str,
    fields: &[FieldAccessor<T>],
    min_chars: usize,
) -> Vec<&'t T> {
    if query.chars().count() < min_chars || fields.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| fields.iter().any(|field| field(item).contains(&needle)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
