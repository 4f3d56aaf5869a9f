//! Windowed page-number strips for listing templates.

use serde::Serialize;

use crate::projection::Projection;

/// Builds the visible page numbers around `current`, with `None` marking an
/// ellipsis gap. Always shows the first and last `edge` pages.
fn page_window(total_pages: usize, current: usize, edge: usize, around: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return Vec::new();
    }
    // An out-of-range current page would push the mid window past the end.
    let current = current.min(total_pages);

    let mut pages = Vec::new();

    let left_end = (1 + edge).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current.saturating_sub(around));
    let mid_end = current
        .saturating_add(around)
        .saturating_add(1)
        .min(total_pages + 1);
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(edge) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

/// A rendered page of items plus the page strip shown under the table.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        Self {
            items,
            pages: page_window(total_pages, current_page, 1, 2),
            page: current_page,
        }
    }
}

impl<T> From<Projection<T>> for Paginated<T> {
    fn from(projection: Projection<T>) -> Self {
        Self::new(
            projection.page_items,
            projection.page,
            projection.total_pages,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_for_empty_collections() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 1, 0);
        assert!(paginated.pages.is_empty());
    }

    #[test]
    fn small_collections_show_every_page() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 2, 3);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn long_strips_collapse_into_ellipses() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 10, 20);
        let pages = paginated.pages;
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(20)));
        assert!(pages.contains(&None));
        assert!(pages.contains(&Some(10)));
    }

    #[test]
    fn page_zero_is_treated_as_one() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 0, 2);
        assert_eq!(paginated.page, 1);
    }

    #[test]
    fn huge_current_page_still_renders_a_strip() {
        let paginated: Paginated<i32> = Paginated::new(vec![], usize::MAX, 3);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }
}
