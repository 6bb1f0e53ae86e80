//! # Pagination
//!
//! Page slicing with clamped page numbers.
//!
//! ```text
//! items: [a b c d e f g]   page_size: 3
//!
//!   page 1 → [a b c]   start 0  end 3
//!   page 2 → [d e f]   start 3  end 6
//!   page 3 → [g]       start 6  end 7
//!   page 9 → clamped to page 3
//!   page 0 → clamped to page 1
//!
//! total_pages = max(1, ceil(len / page_size))   (1 for an empty list)
//! ```

use serde::Serialize;

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Page actually returned (1-based, after clamping).
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// First index of the page (inclusive).
    pub start_index: usize,
    /// Last index of the page (exclusive).
    pub end_index: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Number of pages for `total_items`, never less than 1.
///
/// A `page_size` of 0 is treated as 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_items.div_ceil(page_size).max(1)
}

/// Returns the requested page of `items`, clamping `requested_page` into
/// `[1, total_pages]`.
///
/// ## Example
/// ```rust
/// use comptoir_core::shaping::paginate;
///
/// let items = [1, 2, 3, 4, 5];
/// let page = paginate(&items, 2, 99);
/// assert_eq!(page.page, 3);
/// assert_eq!(page.items, &[5]);
/// assert_eq!((page.start_index, page.end_index), (4, 5));
/// ```
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = requested_page.clamp(1, total_pages);

    let start_index = ((page - 1) * page_size).min(total_items);
    let end_index = (start_index + page_size).min(total_items);

    Page {
        items: &items[start_index..end_index],
        page,
        page_size,
        total_pages,
        total_items,
        start_index,
        end_index,
    }
}

// =============================================================================
// Paginator
// =============================================================================

/// Page cursor for a list whose length can change (filtering, new data).
///
/// The current page is re-clamped whenever the item count or page size
/// changes, so it always points at an existing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Paginator {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Records the current item count and re-clamps the page.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// Slices `items` at the cursor, updating the item count first.
    pub fn apply<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        self.set_total_items(items.len());
        paginate(items, self.page_size, self.page)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_list_has_one_page() {
        let items: [u8; 0] = [];
        let page = paginate(&items, 10, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
        assert_eq!((page.start_index, page.end_index), (0, 0));
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_clamping() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 3, 0).page, 1);
        assert_eq!(paginate(&items, 3, 100).page, 3);
        let middle = paginate(&items, 3, 2);
        assert_eq!(middle.items, &[4, 5, 6]);
        assert!(middle.has_next());
        assert!(middle.has_previous());
    }

    #[test]
    fn test_zero_page_size() {
        let items = [1, 2];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, &[2]);
    }

    #[test]
    fn test_paginator_navigation() {
        let items: Vec<u32> = (0..25).collect();
        let mut cursor = Paginator::new(10);
        assert_eq!(cursor.apply(&items).items.len(), 10);

        cursor.next_page();
        cursor.next_page();
        assert_eq!(cursor.page(), 3);
        cursor.next_page();
        assert_eq!(cursor.page(), 3);
        assert!(!cursor.has_next());
        assert_eq!(cursor.apply(&items).items, &[20, 21, 22, 23, 24]);

        cursor.previous_page();
        assert_eq!(cursor.page(), 2);
        cursor.go_to_page(0);
        assert_eq!(cursor.page(), 1);
        cursor.previous_page();
        assert_eq!(cursor.page(), 1);
    }

    #[test]
    fn test_paginator_reclamps_when_list_shrinks() {
        let mut cursor = Paginator::new(5);
        cursor.set_total_items(50);
        cursor.go_to_page(8);
        assert_eq!(cursor.page(), 8);

        let filtered = [1, 2, 3, 4, 5, 6];
        let page = cursor.apply(&filtered);
        assert_eq!(page.page, 2);
        assert_eq!(page.items, &[6]);

        cursor.set_page_size(3);
        assert_eq!(cursor.page(), 1);
    }

    proptest! {
        #[test]
        fn prop_pages_concatenate_to_items(
            items in proptest::collection::vec(any::<i32>(), 0..200),
            page_size in 1usize..50,
        ) {
            let first = paginate(&items, page_size, 1);
            let expected_pages = std::cmp::max(1, (items.len() + page_size - 1) / page_size);
            prop_assert_eq!(first.total_pages, expected_pages);

            let mut rebuilt = Vec::with_capacity(items.len());
            for page in 1..=first.total_pages {
                rebuilt.extend_from_slice(paginate(&items, page_size, page).items);
            }
            prop_assert_eq!(rebuilt, items);
        }
    }
}
