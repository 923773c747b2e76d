//! Row-side model types
//!
//! The mechanism is agnostic to row schema; rows only need to expose sort
//! keys through [`SortableRow`].

mod value;

pub use value::FieldValue;
pub use value::SortableRow;
