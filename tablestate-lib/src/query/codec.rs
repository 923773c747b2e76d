//! Codec between URL query parameters and [`ViewState`].
//!
//! Decoding never fails: every absent, empty, or malformed parameter falls
//! back to the caller-supplied default state, so the result is always a
//! fully resolved [`ViewState`]. Encoding writes the four owned parameters
//! and leaves every other query pair untouched.
//!
//! # Example
//!
//! ```
//! use tablestate_lib::query::{codec, QueryParams, ViewState};
//!
//! let params = QueryParams::parse("page-index=2&tab=users");
//! let state = codec::decode(&params, &ViewState::default());
//! assert_eq!(state.page_index, 2);
//! assert_eq!(state.page_size, 10);
//!
//! let mut params = params;
//! codec::encode(&state.next_page(), &mut params);
//! assert_eq!(
//!     params.to_query_string(),
//!     "page-index=3&tab=users&page-size=10&sort-desc=false&sort-id=id",
//! );
//! ```

use crate::query::Direction;
use crate::query::QueryParams;
use crate::query::SortKey;
use crate::query::ViewState;

/// Query parameter holding the zero-based page index.
pub const PARAM_PAGE_INDEX: &str = "page-index";
/// Query parameter holding the page size.
pub const PARAM_PAGE_SIZE: &str = "page-size";
/// Query parameter holding the sort direction (`"true"` for descending).
pub const PARAM_SORT_DESC: &str = "sort-desc";
/// Query parameter holding the sort field id.
pub const PARAM_SORT_ID: &str = "sort-id";

/// The four query parameters owned by this mechanism, in canonical order.
pub const OWNED_PARAMS: [&str; 4] = [
    PARAM_PAGE_INDEX,
    PARAM_PAGE_SIZE,
    PARAM_SORT_DESC,
    PARAM_SORT_ID,
];

/// Tuning knobs for [`decode_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Treat an empty `sort-desc` value as descending.
    ///
    /// Earlier revisions of this mechanism parsed `sort-desc=` the same as
    /// `sort-desc=true`. That reading was almost certainly an accident, so
    /// it is off by default; an empty value falls back to the default
    /// direction like any other unparseable input.
    pub legacy_empty_descending: bool,
}

impl DecodeOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the legacy empty-means-descending reading.
    pub fn with_legacy_empty_descending(mut self, enabled: bool) -> Self {
        self.legacy_empty_descending = enabled;
        self
    }
}

/// Decodes query parameters into a view state, with default options.
pub fn decode(params: &QueryParams, defaults: &ViewState) -> ViewState {
    decode_with(params, defaults, &DecodeOptions::default())
}

/// Decodes query parameters into a view state.
///
/// Each owned parameter resolves independently: present and parseable
/// values are used as given, everything else falls back to the matching
/// field of `defaults`. The sort field id is taken verbatim with no
/// validation; an unknown id later sorts nothing rather than erroring.
pub fn decode_with(params: &QueryParams, defaults: &ViewState, options: &DecodeOptions) -> ViewState {
    let page_index = parse_or_default(params.get(PARAM_PAGE_INDEX), 0, defaults.page_index);
    let page_size = parse_or_default(params.get(PARAM_PAGE_SIZE), 1, defaults.page_size);
    let direction = parse_direction(
        params.get(PARAM_SORT_DESC),
        defaults.sort.direction(),
        options,
    );
    let field = match params.get(PARAM_SORT_ID) {
        Some(value) => value.to_string(),
        None => defaults.sort.field().to_string(),
    };

    ViewState::new(page_index, page_size, SortKey::new(field, direction))
}

/// Encodes a view state into query parameters.
///
/// All four owned parameters are written unconditionally; pairs with other
/// keys keep their position and value.
pub fn encode(state: &ViewState, params: &mut QueryParams) {
    params.set(PARAM_PAGE_INDEX, state.page_index.to_string());
    params.set(PARAM_PAGE_SIZE, state.page_size.to_string());
    params.set(PARAM_SORT_DESC, state.sort.direction().as_query_value());
    params.set(PARAM_SORT_ID, state.sort.field());
}

/// Adds defaults for any owned parameter not present, leaving present
/// parameters exactly as they are.
///
/// Returns `true` if anything was added, which is the signal that the
/// canonical URL differs from the requested one and a redirect is due.
pub fn fill_missing(params: &mut QueryParams, defaults: &ViewState) -> bool {
    let mut filled = false;
    for key in OWNED_PARAMS {
        if params.contains_key(key) {
            continue;
        }
        let value = match key {
            PARAM_PAGE_INDEX => defaults.page_index.to_string(),
            PARAM_PAGE_SIZE => defaults.page_size.to_string(),
            PARAM_SORT_DESC => defaults.sort.direction().as_query_value().to_string(),
            _ => defaults.sort.field().to_string(),
        };
        params.set(key, value);
        filled = true;
    }
    filled
}

/// Parses a base-10 integer parameter, falling back to `default` when the
/// value is absent, empty, below `min`, negative, or otherwise not a
/// number.
fn parse_or_default(raw: Option<&str>, min: u32, default: u32) -> u32 {
    let Some(value) = raw else {
        return default;
    };
    match value.parse::<u32>() {
        Ok(n) if n >= min => n,
        _ => default,
    }
}

/// Parses the sort direction parameter.
///
/// Absence is the only "use default" case for well-formed input; `"true"`
/// and `"false"` are the two recognized values and anything else falls
/// back to `default`. With [`DecodeOptions::legacy_empty_descending`] set,
/// an empty value reads as descending and every unrecognized value reads
/// as ascending instead.
fn parse_direction(raw: Option<&str>, default: Direction, options: &DecodeOptions) -> Direction {
    let Some(value) = raw else {
        return default;
    };
    if options.legacy_empty_descending {
        if value == "true" || value.is_empty() {
            Direction::Desc
        } else {
            Direction::Asc
        }
    } else {
        match value {
            "true" => Direction::Desc,
            "false" => Direction::Asc,
            _ => default,
        }
    }
}
