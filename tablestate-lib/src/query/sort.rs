//! Sort field and direction types.

/// Sort direction for table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns `true` for descending order.
    pub fn is_descending(&self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Returns the opposite direction.
    pub fn toggled(&self) -> Direction {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Returns the query-string value for this direction.
    pub(crate) fn as_query_value(&self) -> &'static str {
        match self {
            Direction::Asc => "false",
            Direction::Desc => "true",
        }
    }
}

/// A single sort criterion: which field, and in which direction.
///
/// The table sorts by at most one field at a time, so a view state carries
/// exactly one `SortKey`.
///
/// # Example
///
/// ```
/// use tablestate_lib::query::{Direction, SortKey};
///
/// let sort = SortKey::desc("age");
/// assert_eq!(sort.field(), "age");
/// assert_eq!(sort.direction(), Direction::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    field: String,
    direction: Direction,
}

impl SortKey {
    /// Creates a sort key with an explicit direction.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }

    /// Returns the sorted field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_toggled() {
        assert_eq!(Direction::Asc.toggled(), Direction::Desc);
        assert_eq!(Direction::Desc.toggled(), Direction::Asc);
    }

    #[test]
    fn test_direction_query_value() {
        assert_eq!(Direction::Asc.as_query_value(), "false");
        assert_eq!(Direction::Desc.as_query_value(), "true");
    }

    #[test]
    fn test_sort_key_constructors() {
        assert_eq!(SortKey::asc("name"), SortKey::new("name", Direction::Asc));
        assert_eq!(SortKey::desc("age"), SortKey::new("age", Direction::Desc));
    }
}
