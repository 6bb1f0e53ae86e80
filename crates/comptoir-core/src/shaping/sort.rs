//! # Sort By Key
//!
//! Stable sort driven by a caller-supplied key accessor.
//!
//! ## Ordering Rules
//! ```text
//! Text    collation order: base letters first, then accents, then case
//!         ("eclair" < "Éclair" < "ecole", "a" < "A" < "b")
//! Number  numeric order, NaN after every other number
//! Date    chronological order
//! Missing after every present value
//! ```
//! Descending order reverses the comparison, not the list, so equal keys
//! keep their input order in both directions.

use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A comparable key extracted from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Text(Cow<'a, str>),
    Number(f64),
    Date(DateTime<Utc>),
    Missing,
}

impl<'a> SortValue<'a> {
    pub fn text(value: &'a str) -> Self {
        SortValue::Text(Cow::Borrowed(value))
    }

    /// `Missing` when `None`.
    pub fn opt_date(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Date)
    }

    const fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Date(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Missing => 3,
        }
    }

    /// Total order over keys.
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => compare_text(a, b),
            (SortValue::Number(a), SortValue::Number(b)) => compare_numbers(*a, *b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Accessor extracting the sort key from a record.
pub type SortKey<T> = for<'a> fn(&'a T) -> SortValue<'a>;

/// Sorts `items` in place by `key`. `None` leaves the slice untouched.
///
/// Works on owned records as well as on the references returned by
/// [`filter_items`](super::filter_items).
///
/// ## Example
/// ```rust
/// use comptoir_core::shaping::sort::{sort_items, SortKey, SortOrder, SortValue};
///
/// struct Row { name: &'static str }
/// fn by_name(row: &Row) -> SortValue<'_> { SortValue::text(row.name) }
///
/// let mut rows = vec![Row { name: "Zoé" }, Row { name: "Émile" }, Row { name: "adèle" }];
/// sort_items(&mut rows, Some(by_name as SortKey<Row>), SortOrder::Asc);
/// let names: Vec<_> = rows.iter().map(|r| r.name).collect();
/// assert_eq!(names, ["adèle", "Émile", "Zoé"]);
/// ```
pub fn sort_items<T, R: Borrow<T>>(items: &mut [R], key: Option<SortKey<T>>, order: SortOrder) {
    let Some(key) = key else {
        return;
    };

    items.sort_by(|a, b| {
        let ordering = key(a.borrow()).compare(&key(b.borrow()));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Three-level collation: base letters, then accents, then case
/// (lowercase first).
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .cmp(b.chars().flat_map(char::to_lowercase).map(fold_accent));

    primary
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

/// Maps an accented Latin letter to its base letter.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sale;
    use chrono::TimeZone;

    fn sale(id: &str, name: &str, price: f64, day: Option<u32>) -> Sale {
        Sale {
            id: id.into(),
            product_id: format!("p-{}", id),
            product_name: Some(name.into()),
            client_id: None,
            selling_price: price,
            purchase_price: 1.0,
            quantity: 1.0,
            profit: None,
            date: day.map(|d| Utc.with_ymd_and_hms(2024, 3, d, 9, 0, 0).unwrap()),
        }
    }

    const BY_PRICE: SortKey<Sale> = |s| SortValue::Number(s.selling_price);
    const BY_NAME: SortKey<Sale> =
        |s| s.product_name.as_deref().map_or(SortValue::Missing, SortValue::text);
    const BY_DATE: SortKey<Sale> = |s| SortValue::opt_date(s.date);

    fn ids<R: Borrow<Sale>>(sales: &[R]) -> Vec<&str> {
        sales.iter().map(|s| s.borrow().id.as_str()).collect()
    }

    #[test]
    fn test_none_key_is_noop() {
        let mut sales = vec![sale("b", "B", 2.0, None), sale("a", "A", 1.0, None)];
        sort_items::<Sale, _>(&mut sales, None, SortOrder::Asc);
        assert_eq!(ids(&sales), ["b", "a"]);
    }

    #[test]
    fn test_numeric_sort_is_stable_both_ways() {
        let mut sales = vec![
            sale("x", "X", 5.0, None),
            sale("y", "Y", 1.0, None),
            sale("z", "Z", 5.0, None),
            sale("n", "N", f64::NAN, None),
        ];
        sort_items(&mut sales, Some(BY_PRICE), SortOrder::Asc);
        assert_eq!(ids(&sales), ["y", "x", "z", "n"]);

        sort_items(&mut sales, Some(BY_PRICE), SortOrder::Desc);
        assert_eq!(ids(&sales), ["n", "x", "z", "y"]);
    }

    #[test]
    fn test_text_collation() {
        let mut sales = vec![
            sale("1", "ecole", 0.0, None),
            sale("2", "Éclair", 0.0, None),
            sale("3", "eclair", 0.0, None),
            sale("4", "Abricot", 0.0, None),
        ];
        sort_items(&mut sales, Some(BY_NAME), SortOrder::Asc);
        assert_eq!(ids(&sales), ["4", "3", "2", "1"]);
    }

    #[test]
    fn test_date_sort_on_references() {
        let sales = vec![
            sale("late", "L", 0.0, Some(20)),
            sale("none", "N", 0.0, None),
            sale("early", "E", 0.0, Some(2)),
        ];
        let mut refs: Vec<&Sale> = sales.iter().collect();
        sort_items(&mut refs, Some(BY_DATE), SortOrder::Asc);
        assert_eq!(ids(&refs), ["early", "late", "none"]);
    }

    #[test]
    fn test_compare_text_case_levels() {
        assert_eq!(compare_text("a", "A"), Ordering::Less);
        assert_eq!(compare_text("A", "b"), Ordering::Less);
        assert_eq!(compare_text("même", "meme"), Ordering::Greater);
        assert_eq!(compare_text("même", "mêmes"), Ordering::Less);
        assert_eq!(compare_text("", ""), Ordering::Equal);
    }
}
