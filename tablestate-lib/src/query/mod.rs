//! View state, query parameters, and the codec between them.
//!
//! This module owns the pure state layer: what the table currently shows
//! ([`ViewState`]) and how that round-trips through a URL query string
//! ([`QueryParams`], [`codec`]).
//!
//! # Shared Types
//!
//! - [`ViewState`] - The canonical view state (page index, page size, sort)
//! - [`QueryParams`] - An order-preserving multimap over query pairs
//! - [`SortKey`] - A sort field with its [`Direction`]
//! - [`Page`] - A page of rows with the total row count
//!
//! # Codec
//!
//! - [`codec`] - Decoding and encoding between the two representations

pub mod codec;
mod page;
mod params;
mod sort;
mod state;

pub use page::Page;
pub use params::QueryParams;
pub use sort::Direction;
pub use sort::SortKey;
pub use state::ViewState;
