//! Table view-state synchronization library
//!
//! Keeps a paginated, sortable table's view state (page index, page size,
//! single sort column and direction) synchronized with a URL query string,
//! and fetches pages of rows through a pluggable data-source strategy.

pub mod error;
pub mod model;
pub mod query;
pub mod source;

pub use error::SourceError;
pub use query::Page;
pub use query::QueryParams;
pub use query::ViewState;
pub use source::DataSource;
