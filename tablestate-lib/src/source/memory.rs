//! Client-resident data source: sort and slice a full in-memory row set.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;

use super::DataSource;
use crate::error::SourceError;
use crate::model::SortableRow;
use crate::query::Page;
use crate::query::ViewState;

/// A data source holding the complete row set in memory.
///
/// Every fetch sorts the full set by the requested field and direction,
/// then returns the contiguous slice the page index and size describe.
/// The row set is shared behind an [`Arc`], so the source clones cheaply
/// and can be built over a store owned elsewhere.
///
/// # Example
///
/// ```ignore
/// use tablestate_lib::source::InMemorySource;
///
/// let source = InMemorySource::new(rows);
/// let page = source.fetch(&state).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InMemorySource<R> {
    rows: Arc<Vec<R>>,
}

impl<R> InMemorySource<R> {
    /// Creates a source over an owned row set.
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Creates a source over an already shared row set.
    pub fn from_arc(rows: Arc<Vec<R>>) -> Self {
        Self { rows }
    }

    /// Returns the total number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the row set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl<R> DataSource for InMemorySource<R>
where
    R: SortableRow + Clone + Send + Sync,
{
    type Row = R;

    async fn fetch(&self, state: &ViewState) -> Result<Page<R>, SourceError> {
        Ok(sort_and_slice(&self.rows, state))
    }
}

/// Sorts a full row set by the view state's sort key and returns the page
/// its index and size select.
///
/// The sort is stable: rows comparing equal keep their original relative
/// order, in both directions. Rows are compared through
/// [`SortableRow::sort_value`]; a field unknown to the rows compares every
/// pair equal, which leaves the original order intact. A page index past
/// the end yields an empty page, and a zero page size is clamped to 1.
pub fn sort_and_slice<R>(rows: &[R], state: &ViewState) -> Page<R>
where
    R: SortableRow + Clone,
{
    let field = state.sort.field();
    let descending = state.sort.direction().is_descending();

    // Sort indices rather than rows so ties keep their original order
    // even when the comparison is reversed.
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = match (rows[a].sort_value(field), rows[b].sort_value(field)) {
            (Some(x), Some(y)) => x.compare(&y),
            _ => Ordering::Equal,
        };
        if descending { ord.reverse() } else { ord }
    });

    let page_size = state.page_size.max(1) as usize;
    let start = state.offset().min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    let page_rows = order[start..end].iter().map(|&i| rows[i].clone()).collect();

    Page::new(page_rows, rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use crate::query::SortKey;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        age: u32,
    }

    impl SortableRow for Row {
        fn sort_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(self.name.into()),
                "age" => Some(self.age.into()),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "John", age: 40 },
            Row { name: "Alex", age: 23 },
            Row { name: "Derek", age: 33 },
        ]
    }

    fn ages(page: &Page<Row>) -> Vec<u32> {
        page.rows().iter().map(|r| r.age).collect()
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let rows = rows();
        let asc = sort_and_slice(&rows, &ViewState::new(0, 10, SortKey::asc("age")));
        assert_eq!(ages(&asc), vec![23, 33, 40]);

        let desc = sort_and_slice(&rows, &ViewState::new(0, 10, SortKey::desc("age")));
        assert_eq!(ages(&desc), vec![40, 33, 23]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let rows = vec![
            Row { name: "first", age: 30 },
            Row { name: "second", age: 30 },
            Row { name: "third", age: 20 },
        ];
        let asc = sort_and_slice(&rows, &ViewState::new(0, 10, SortKey::asc("age")));
        let names: Vec<_> = asc.rows().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["third", "first", "second"]);

        let desc = sort_and_slice(&rows, &ViewState::new(0, 10, SortKey::desc("age")));
        let names: Vec<_> = desc.rows().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unknown_field_leaves_order_unchanged() {
        let rows = rows();
        let page = sort_and_slice(&rows, &ViewState::new(0, 10, SortKey::asc("bogus")));
        assert_eq!(ages(&page), vec![40, 23, 33]);
    }

    #[test]
    fn test_slice_bounds() {
        let rows: Vec<Row> = (0..25).map(|i| Row { name: "n", age: i }).collect();

        let full = sort_and_slice(&rows, &ViewState::new(0, 10, SortKey::asc("age")));
        assert_eq!(full.len(), 10);
        assert_eq!(full.total_count(), 25);

        let remainder = sort_and_slice(&rows, &ViewState::new(2, 10, SortKey::asc("age")));
        assert_eq!(remainder.len(), 5);

        let past_end = sort_and_slice(&rows, &ViewState::new(3, 10, SortKey::asc("age")));
        assert!(past_end.is_empty());
        assert_eq!(past_end.total_count(), 25);
    }

    #[test]
    fn test_zero_page_size_clamps_to_one() {
        let rows = rows();
        let page = sort_and_slice(&rows, &ViewState::new(0, 0, SortKey::asc("age")));
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_through_trait() {
        let source = InMemorySource::new(rows());
        let page = source
            .fetch(&ViewState::new(0, 2, SortKey::desc("name")))
            .await
            .unwrap();
        let names: Vec<_> = page.rows().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["John", "Derek"]);
        assert_eq!(page.total_count(), 3);
    }
}
