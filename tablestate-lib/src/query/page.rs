//! Page type for a single fetched slice of rows.

use serde::Deserialize;
use serde::Serialize;

/// A page of rows together with the total row count across all pages.
///
/// The row type is caller-defined; the mechanism never looks inside rows
/// except through the sort accessor. On the wire a page serializes as
/// `{"rows": [...], "totalCount": n}`.
///
/// # Example
///
/// ```
/// use tablestate_lib::query::Page;
///
/// let page = Page::new(vec!["a", "b", "c"], 25);
/// assert_eq!(page.len(), 3);
/// assert_eq!(page.total_count(), 25);
/// assert_eq!(page.page_count(10), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<R> {
    rows: Vec<R>,
    #[serde(rename = "totalCount")]
    total_count: usize,
}

impl<R> Page<R> {
    /// Creates a page from its rows and the total row count.
    pub fn new(rows: Vec<R>, total_count: usize) -> Self {
        Self { rows, total_count }
    }

    /// Creates an empty page of an empty data set.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Returns a reference to the rows in this page.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    /// Returns the total row count across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of pages the total count spans, at least 1.
    ///
    /// A `page_size` of zero is clamped to 1 instead of dividing by zero,
    /// and an empty data set still counts as one empty page so navigation
    /// always has a current page.
    pub fn page_count(&self, page_size: u32) -> usize {
        self.total_count.div_ceil(page_size.max(1) as usize).max(1)
    }

    /// Returns `true` if pages exist beyond the given page index.
    pub fn has_more(&self, page_index: u32, page_size: u32) -> bool {
        (page_index as usize) + 1 < self.page_count(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        let page: Page<u8> = Page::new(Vec::new(), 25);
        assert_eq!(page.page_count(10), 3);
        assert_eq!(page.page_count(25), 1);
        assert_eq!(page.page_count(7), 4);
    }

    #[test]
    fn test_page_count_clamps_zero_page_size() {
        let page: Page<u8> = Page::new(Vec::new(), 5);
        assert_eq!(page.page_count(0), 5);
    }

    #[test]
    fn test_page_count_of_empty_set_is_one() {
        let page: Page<u8> = Page::empty();
        assert_eq!(page.page_count(10), 1);
    }

    #[test]
    fn test_has_more() {
        let page: Page<u8> = Page::new(Vec::new(), 25);
        assert!(page.has_more(0, 10));
        assert!(page.has_more(1, 10));
        assert!(!page.has_more(2, 10));
        assert!(!page.has_more(99, 10));
    }

    #[test]
    fn test_wire_shape() {
        let page = Page::new(vec![1, 2, 3], 9);
        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(json, r#"{"rows":[1,2,3],"totalCount":9}"#);

        let parsed: Page<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, page);
    }
}
