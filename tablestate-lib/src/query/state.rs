//! The canonical table view state and its transitions.

use crate::query::Direction;
use crate::query::SortKey;

/// What the table currently shows: which page, how many rows per page, and
/// the single sort criterion.
///
/// A `ViewState` is always fully resolved; decoding fills missing or
/// malformed parameters from a default state, so no field is ever "unset".
/// Transitions return a new state instead of mutating in place.
///
/// # Example
///
/// ```
/// use tablestate_lib::query::{SortKey, ViewState};
///
/// let state = ViewState::default().with_page_index(2).toggle_sort("age");
/// assert_eq!(state.page_index, 0);
/// assert_eq!(state.sort, SortKey::asc("age"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Zero-based page index.
    pub page_index: u32,
    /// Rows per page.
    pub page_size: u32,
    /// The single sort criterion.
    pub sort: SortKey,
}

impl Default for ViewState {
    /// First page of ten rows, sorted ascending by `id`.
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
            sort: SortKey::asc("id"),
        }
    }
}

impl ViewState {
    /// Creates a view state from its parts.
    pub fn new(page_index: u32, page_size: u32, sort: SortKey) -> Self {
        Self {
            page_index,
            page_size,
            sort,
        }
    }

    /// Returns the state advanced to the next page.
    pub fn next_page(&self) -> Self {
        self.with_page_index(self.page_index.saturating_add(1))
    }

    /// Returns the state moved to the previous page, saturating at the
    /// first page.
    pub fn prev_page(&self) -> Self {
        self.with_page_index(self.page_index.saturating_sub(1))
    }

    /// Returns the state moved to a specific page.
    pub fn with_page_index(&self, page_index: u32) -> Self {
        Self {
            page_index,
            ..self.clone()
        }
    }

    /// Returns the state with a new page size, back on the first page.
    pub fn with_page_size(&self, page_size: u32) -> Self {
        Self {
            page_index: 0,
            page_size,
            ..self.clone()
        }
    }

    /// Returns the state sorted by the given field.
    ///
    /// Clicking the field the table is already sorted by flips the
    /// direction; clicking a different field sorts ascending by it. Either
    /// way the state returns to the first page.
    pub fn toggle_sort(&self, field: impl Into<String>) -> Self {
        let field = field.into();
        let sort = if self.sort.field() == field {
            SortKey::new(field, self.sort.direction().toggled())
        } else {
            SortKey::new(field, Direction::Asc)
        };
        Self {
            page_index: 0,
            page_size: self.page_size,
            sort,
        }
    }

    /// Returns the index of the first row on the current page.
    pub fn offset(&self) -> usize {
        (self.page_index as usize).saturating_mul(self.page_size as usize)
    }
}
