//! In-memory list projection: filter, sort, paginate.
//!
//! Listing views fetch a snapshot of rows once and project it entirely in
//! memory. `project` is a pure function of its inputs, which keeps every
//! listing behavior testable without a database.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Page size used by every listing view.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flipped(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// A sort column together with its direction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub dir: SortDir,
}

impl<K: Copy + PartialEq> SortSpec<K> {
    pub fn ascending(key: K) -> Self {
        Self {
            key,
            dir: SortDir::Asc,
        }
    }

    /// Applies a column-header click: re-selecting the current key toggles
    /// the direction, any other key starts ascending.
    pub fn select(current: Option<Self>, key: K) -> Self {
        match current {
            Some(spec) if spec.key == key => Self {
                key,
                dir: spec.dir.flipped(),
            },
            _ => Self::ascending(key),
        }
    }
}

/// Rows that can be projected: they expose a free-text match over their
/// fixed searchable fields and an ordering per sort key.
pub trait Projectable {
    type SortKey: Copy;

    /// Case-insensitive substring match; `needle` is already lower-cased.
    fn matches(&self, needle: &str) -> bool;

    fn cmp_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// The exact slice a listing view renders.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Projection<T> {
    pub page_items: Vec<T>,
    pub total_pages: usize,
    pub page: usize,
}

/// Filters, sorts, and paginates a snapshot.
///
/// An empty query matches everything. The sort is stable: rows that compare
/// equal keep their fetch order. A page past the last one yields an empty
/// slice rather than an error.
pub fn project<T>(
    items: &[T],
    query: &str,
    sort: Option<SortSpec<T::SortKey>>,
    page: usize,
    per_page: usize,
) -> Projection<T>
where
    T: Projectable + Clone,
{
    let page = if page == 0 { 1 } else { page };
    let needle = query.trim().to_lowercase();

    let mut filtered: Vec<T> = items
        .iter()
        .filter(|item| needle.is_empty() || item.matches(&needle))
        .cloned()
        .collect();

    if let Some(spec) = sort {
        filtered.sort_by(|a, b| {
            let ord = a.cmp_by(b, spec.key);
            match spec.dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
    }

    let total_pages = filtered.len().div_ceil(per_page);
    // The page number comes straight from the query string; saturate instead
    // of trusting it to stay within multiplication range.
    let page_items = filtered
        .into_iter()
        .skip(page.saturating_sub(1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Projection {
        page_items,
        total_pages,
        page,
    }
}

/// Case-insensitive substring check used by `Projectable` implementations.
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum RowKey {
        Name,
        Rank,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        rank: i32,
    }

    impl Projectable for Row {
        type SortKey = RowKey;

        fn matches(&self, needle: &str) -> bool {
            contains_ci(self.name, needle)
        }

        fn cmp_by(&self, other: &Self, key: RowKey) -> Ordering {
            match key {
                RowKey::Name => self.name.cmp(other.name),
                RowKey::Rank => self.rank.cmp(&other.rank),
            }
        }
    }

    fn row(name: &'static str, rank: i32) -> Row {
        Row { name, rank }
    }

    #[test]
    fn empty_input_yields_zero_pages() {
        let projection = project::<Row>(&[], "", None, 1, DEFAULT_PAGE_SIZE);
        assert!(projection.page_items.is_empty());
        assert_eq!(projection.total_pages, 0);
    }

    #[test]
    fn twelve_items_split_into_three_pages_of_five() {
        let items: Vec<Row> = (0..12).map(|i| row("x", i)).collect();

        let first = project(&items, "", None, 1, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.page_items.len(), 5);

        let last = project(&items, "", None, 3, 5);
        assert_eq!(last.page_items.len(), 2);

        let beyond = project(&items, "", None, 4, 5);
        assert_eq!(beyond.page_items.len(), 0);
        assert_eq!(beyond.total_pages, 3);
    }

    #[test]
    fn huge_page_numbers_yield_an_empty_slice() {
        let items: Vec<Row> = (0..12).map(|i| row("x", i)).collect();
        let projection = project(&items, "", None, usize::MAX, 5);
        assert!(projection.page_items.is_empty());
        assert_eq!(projection.total_pages, 3);
    }

    #[test]
    fn filtering_is_case_insensitive() {
        let items = [row("Perez", 1), row("Gomez", 2)];
        let projection = project(&items, "PEREZ", None, 1, 5);
        assert_eq!(projection.page_items, vec![row("Perez", 1)]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let items = [row("a", 1), row("b", 2)];
        assert_eq!(project(&items, "  ", None, 1, 5).page_items.len(), 2);
    }

    #[test]
    fn reselecting_a_key_toggles_direction() {
        let items = [row("b", 2), row("a", 1), row("c", 3)];

        let asc = SortSpec::select(None, RowKey::Name);
        assert_eq!(asc.dir, SortDir::Asc);
        let ascending = project(&items, "", Some(asc), 1, 5);
        let names: Vec<_> = ascending.page_items.iter().map(|r| r.name).collect();
        assert_eq!(names, ["a", "b", "c"]);

        let desc = SortSpec::select(Some(asc), RowKey::Name);
        assert_eq!(desc.dir, SortDir::Desc);
        let descending = project(&items, "", Some(desc), 1, 5);
        let names: Vec<_> = descending.page_items.iter().map(|r| r.name).collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[test]
    fn selecting_a_new_key_resets_to_ascending() {
        let current = Some(SortSpec {
            key: RowKey::Name,
            dir: SortDir::Desc,
        });
        let spec = SortSpec::select(current, RowKey::Rank);
        assert_eq!(spec.key, RowKey::Rank);
        assert_eq!(spec.dir, SortDir::Asc);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let items = [row("first", 1), row("second", 1), row("third", 1)];
        for dir in [SortDir::Asc, SortDir::Desc] {
            let spec = SortSpec {
                key: RowKey::Rank,
                dir,
            };
            let projection = project(&items, "", Some(spec), 1, 5);
            let names: Vec<_> = projection.page_items.iter().map(|r| r.name).collect();
            assert_eq!(names, ["first", "second", "third"]);
        }
    }

    #[test]
    fn projection_is_pure() {
        let items = [row("a", 2), row("b", 1)];
        let spec = Some(SortSpec::ascending(RowKey::Rank));
        assert_eq!(
            project(&items, "a", spec, 1, 5),
            project(&items, "a", spec, 1, 5)
        );
    }
}
