//! Field values used for client-side sorting

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;

/// A typed value extracted from a row field for comparison
///
/// # Example
///
/// ```
/// use tablestate_lib::model::FieldValue;
///
/// let a = FieldValue::Int(23);
/// let b = FieldValue::Int(40);
/// assert!(a.compare(&b).is_lt());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Str(String),
    /// Boolean value
    Bool(bool),
    /// DateTime value
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Returns the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "str",
            FieldValue::Bool(_) => "bool",
            FieldValue::DateTime(_) => "datetime",
        }
    }

    /// Compares two values of the same variant in their natural order
    ///
    /// Values of different variants compare as equal, which leaves row
    /// order untouched when a column holds mixed types.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Str(a), FieldValue::Str(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Rows that can be sorted by named field
///
/// Returning `None` for an unknown field makes the sort a no-op for that
/// field rather than an error.
///
/// # Example
///
/// ```
/// use tablestate_lib::model::{FieldValue, SortableRow};
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// impl SortableRow for Person {
///     fn sort_value(&self, field: &str) -> Option<FieldValue> {
///         match field {
///             "name" => Some(self.name.clone().into()),
///             "age" => Some(i64::from(self.age).into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait SortableRow {
    /// Returns the value of the named field, or `None` if the row has no
    /// such field
    fn sort_value(&self, field: &str) -> Option<FieldValue>;
}

// ===== From implementations =====

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        FieldValue::DateTime(dt)
    }
}
