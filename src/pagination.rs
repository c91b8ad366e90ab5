//! Pagination for RMAPI list responses.
//!
//! RMAPI pages are 1-indexed (`offset` is the page number) and report the
//! overall match count as `totalResults`.

use serde::Serialize;

/// A page of results from an RMAPI list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matches reported by RMAPI (if known).
    pub total: Option<u64>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Requested page size.
    pub count: u32,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, count: u32, total: Option<u64>) -> Self {
        let has_more = more_pages(page, count, total, items.len());
        Self::with_has_more(items, page, count, total, has_more)
    }

    /// Build a page whose `has_more` was decided before the items were
    /// filtered, so `total` may be lower than what RMAPI reported.
    #[must_use]
    pub fn with_has_more(
        items: Vec<T>,
        page: u32,
        count: u32,
        total: Option<u64>,
        has_more: bool,
    ) -> Self {
        Self {
            items,
            total,
            page,
            count,
            has_more,
        }
    }

    /// Number of pages implied by `total`, if known.
    pub fn total_pages(&self) -> Option<u64> {
        let count = u64::from(self.count.max(1));
        self.total.map(|t| t.div_ceil(count))
    }

    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            count: self.count,
            has_more: self.has_more,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

/// Whether pages follow `page`, given the vendor's total or, without one,
/// the number of items RMAPI returned.
pub(crate) fn more_pages(page: u32, count: u32, total: Option<u64>, returned: usize) -> bool {
    match total {
        Some(t) => (u64::from(page) * u64::from(count)) < t,
        None => returned >= count as usize,
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more_from_total_results() {
        let page: Page<i32> = Page::new(vec![1; 25], 1, 25, Some(60));
        assert!(page.has_more);
        assert_eq!(page.total_pages(), Some(3));

        let page: Page<i32> = Page::new(vec![1; 10], 3, 25, Some(60));
        assert!(!page.has_more);
    }

    #[test]
    fn test_has_more_without_total() {
        let page: Page<i32> = Page::new(vec![1; 25], 1, 25, None);
        assert!(page.has_more);
        assert_eq!(page.total_pages(), None);

        let page: Page<i32> = Page::new(vec![1; 3], 1, 25, None);
        assert!(!page.has_more);
    }

    #[test]
    fn test_with_has_more_keeps_flag() {
        let page: Page<i32> = Page::with_has_more(vec![1; 5], 1, 10, Some(5), true);
        assert!(page.has_more);
        assert_eq!(page.total, Some(5));
    }

    #[test]
    fn test_page_map_keeps_paging() {
        let page = Page::new(vec![1, 2, 3], 2, 3, Some(9));
        let mapped = page.map(|x| x.to_string());
        assert_eq!(mapped.items, vec!["1", "2", "3"]);
        assert_eq!(mapped.page, 2);
        assert!(mapped.has_more);
    }
}
