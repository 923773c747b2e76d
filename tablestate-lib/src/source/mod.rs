//! Data source strategies for fetching pages of rows.
//!
//! A [`DataSource`] turns a [`ViewState`] into a [`Page`]. Two strategies
//! implement the contract, chosen once at startup rather than per request:
//!
//! - [`InMemorySource`] - sorts and slices a full row set held locally
//! - [`RemoteSource`] - asks an HTTP endpoint for exactly one page
//!
//! [`PageLoader`] wraps either strategy and drops results of superseded
//! fetches so the newest request always wins.

mod loader;
mod memory;
mod remote;

pub use loader::LoadOutcome;
pub use loader::PageLoader;
pub use memory::sort_and_slice;
pub use memory::InMemorySource;
pub use remote::RemoteSource;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::query::Page;
use crate::query::ViewState;

/// Trait for page-producing data sources.
///
/// Implementations resolve a view state to the matching page of rows plus
/// the total row count. A page index beyond the available rows resolves to
/// an empty page, not an error; errors are reserved for genuine fetch
/// failures.
///
/// # Example
///
/// ```ignore
/// use tablestate_lib::query::ViewState;
/// use tablestate_lib::source::{DataSource, InMemorySource};
///
/// let source = InMemorySource::new(rows);
/// let page = source.fetch(&ViewState::default()).await?;
/// println!("{} of {} rows", page.len(), page.total_count());
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    /// The row type this source produces.
    type Row;

    /// Fetches the page of rows described by the view state.
    async fn fetch(&self, state: &ViewState) -> Result<Page<Self::Row>, SourceError>;
}
