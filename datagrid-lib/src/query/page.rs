//! Pagination of processed rows.

use serde::Deserialize;
use serde::Serialize;

/// Returns page `page` (1-based) of `rows`, `page_size` rows per page.
///
/// A page past the end, page 0, or a page size of 0 yields an empty slice.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::paginate;
///
/// let rows: Vec<u32> = (0..12).collect();
/// assert_eq!(paginate(&rows, 2, 2), &[2, 3]);
/// assert!(paginate(&rows, 7, 2).is_empty());
/// ```
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
    else {
        return &[];
    };
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed for `total_items` (0 when there are no items).
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Page to show after changing the page size, keeping the first visible row
/// on screen.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::rebase_page;
///
/// // Page 3 of 10 starts at row 21; with 25 per page that row is on page 1.
/// assert_eq!(rebase_page(3, 10, 25), 1);
/// ```
pub fn rebase_page(page: usize, old_size: usize, new_size: usize) -> usize {
    let first_row = page
        .max(1)
        .saturating_sub(1)
        .saturating_mul(old_size)
        .saturating_add(1);
    first_row.div_ceil(new_size.max(1))
}

/// Pagination state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Current page, 1-based.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of rows being paged.
    pub total: usize,
}

impl PageState {
    /// Creates the state for the first page.
    pub fn new(page_size: usize, total: usize) -> Self {
        Self {
            page: 1,
            page_size,
            total,
        }
    }

    /// Number of pages.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Index of the first row on the current page, 0-based.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Position of the first row on the current page, 1-based.
    pub fn first_row(&self) -> usize {
        self.offset().saturating_add(1)
    }

    /// Navigation strip for this state with `siblings` pages either side.
    pub fn items(&self, siblings: usize) -> Vec<PageItem> {
        page_items(self.total, self.page_size, self.page, siblings)
    }
}

/// One entry of a pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A page number.
    Page(usize),
    /// A gap of hidden pages.
    Ellipsis,
}

/// Builds the pagination strip: page numbers with ellipses for gaps.
///
/// When every page fits (`siblings * 2 + 5` slots) all pages are listed.
/// Otherwise the first and last pages are always shown; near either end a
/// run of `1 + 2 * siblings` pages is shown, elsewhere the pages within
/// `siblings` of the current one, with an ellipsis on each hidden side.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::{page_items, PageItem::*};
///
/// assert_eq!(
///     page_items(200, 10, 10, 1),
///     vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
/// );
/// ```
pub fn page_items(total_items: usize, page_size: usize, current: usize, siblings: usize) -> Vec<PageItem> {
    let pages = total_pages(total_items, page_size);
    let all = |from: usize, to: usize| (from..=to).map(PageItem::Page);

    // siblings + current + first + last, plus two ellipsis slots
    let slots = siblings.saturating_mul(2).saturating_add(5);
    if pages <= slots {
        return all(1, pages).collect();
    }

    let current = current.clamp(1, pages);
    let left = current.saturating_sub(siblings).max(1);
    let right = current.saturating_add(siblings).min(pages);
    let left_gap = left > 2;
    let right_gap = right < pages - 1;
    let edge_run = 1 + 2 * siblings;

    match (left_gap, right_gap) {
        (false, true) => all(1, edge_run)
            .chain([PageItem::Ellipsis, PageItem::Page(pages)])
            .collect(),
        (true, false) => [PageItem::Page(1), PageItem::Ellipsis]
            .into_iter()
            .chain(all(pages - edge_run + 1, pages))
            .collect(),
        (true, true) => [PageItem::Page(1), PageItem::Ellipsis]
            .into_iter()
            .chain(all(left, right))
            .chain([PageItem::Ellipsis, PageItem::Page(pages)])
            .collect(),
        (false, false) => all(1, pages).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::PageItem::*;
    use super::*;

    #[test]
    fn test_paginate_slices() {
        let rows: Vec<usize> = (0..12).collect();
        assert_eq!(paginate(&rows, 1, 2), &[0, 1]);
        assert_eq!(paginate(&rows, 2, 2), &[2, 3]);
        assert_eq!(paginate(&rows, 6, 2), &[10, 11]);
        assert!(paginate(&rows, 7, 2).is_empty());
    }

    #[test]
    fn test_paginate_partial_last_page() {
        let rows: Vec<usize> = (0..5).collect();
        assert_eq!(paginate(&rows, 2, 3), &[3, 4]);
    }

    #[test]
    fn test_paginate_degenerate_input() {
        let rows: Vec<usize> = (0..5).collect();
        assert!(paginate(&rows, 0, 2).is_empty());
        assert!(paginate(&rows, 1, 0).is_empty());
        assert!(paginate(&rows, usize::MAX, 2).is_empty());
    }

    #[test]
    fn test_rebase_page_huge_page() {
        assert_eq!(rebase_page(usize::MAX, 10, 25), usize::MAX.div_ceil(25));
        assert_eq!(rebase_page(usize::MAX, usize::MAX, 1), usize::MAX);
    }

    #[test]
    fn test_page_items_huge_inputs() {
        assert_eq!(
            page_items(1000, 10, usize::MAX, 1),
            vec![Page(1), Ellipsis, Page(98), Page(99), Page(100)]
        );
        assert_eq!(page_items(1000, 10, 0, 1)[0..3], [Page(1), Page(2), Page(3)]);

        let every = page_items(50, 10, 3, usize::MAX);
        assert_eq!(every, vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn test_rebase_page() {
        assert_eq!(rebase_page(1, 10, 5), 1);
        // First row 11 -> page 3 at 5 per page.
        assert_eq!(rebase_page(2, 10, 5), 3);
        // First row 41 -> page 2 at 25 per page.
        assert_eq!(rebase_page(5, 10, 25), 2);
    }

    #[test]
    fn test_page_state_navigation() {
        let mut state = PageState::new(10, 35);
        assert_eq!(state.total_pages(), 4);
        assert!(!state.has_previous());
        assert!(state.has_next());
        state.page = 4;
        assert!(state.has_previous());
        assert!(!state.has_next());
        assert_eq!(state.first_row(), 31);
    }

    #[test]
    fn test_page_items_all_fit() {
        assert_eq!(page_items(50, 10, 1, 1), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
        assert_eq!(page_items(70, 10, 4, 1).len(), 7);
        assert!(page_items(0, 10, 1, 1).is_empty());
    }

    #[test]
    fn test_page_items_near_start() {
        assert_eq!(
            page_items(200, 10, 2, 1),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_page_items_near_end() {
        assert_eq!(
            page_items(200, 10, 19, 1),
            vec![Page(1), Ellipsis, Page(18), Page(19), Page(20)]
        );
    }
}
