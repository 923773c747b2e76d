//! Last-request-wins coordination for page fetches.

use std::sync::Arc;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use super::DataSource;
use crate::error::SourceError;
use crate::query::Page;
use crate::query::ViewState;

/// Serializes page fetches so only the newest request's result is ever
/// reported.
///
/// Each call to [`PageLoader::load`] cancels the fetch before it. A fetch
/// whose result arrives after a newer fetch has started resolves to
/// [`LoadOutcome::Superseded`] instead of delivering stale rows, whatever
/// order the responses arrive in. Errors from superseded fetches are
/// dropped the same way.
///
/// # Example
///
/// ```ignore
/// use tablestate_lib::source::{LoadOutcome, PageLoader};
///
/// let loader = PageLoader::new(source);
/// match loader.load(&state).await {
///     LoadOutcome::Loaded(page) => render(page),
///     LoadOutcome::Failed(error) => render_error(error),
///     LoadOutcome::Superseded => {} // a newer request is in flight
/// }
/// ```
pub struct PageLoader<R> {
    source: Arc<dyn DataSource<Row = R>>,
    current: Mutex<CancellationToken>,
}

impl<R> PageLoader<R> {
    /// Creates a loader over a shared data source.
    pub fn new(source: Arc<dyn DataSource<Row = R>>) -> Self {
        Self {
            source,
            current: Mutex::new(CancellationToken::new()),
        }
    }

    /// Fetches the page for a view state, superseding any fetch still in
    /// flight.
    pub async fn load(&self, state: &ViewState) -> LoadOutcome<R> {
        let token = {
            let mut current = self.current.lock().unwrap();
            current.cancel();
            *current = CancellationToken::new();
            current.clone()
        };

        let result = tokio::select! {
            _ = token.cancelled() => {
                return LoadOutcome::Superseded;
            }
            result = self.source.fetch(state) => result,
        };

        // The fetch may complete in the same instant a newer request
        // cancels this one; the newer request still wins.
        if token.is_cancelled() {
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(page) => LoadOutcome::Loaded(page),
            Err(error) => LoadOutcome::Failed(error),
        }
    }
}

/// The result of a [`PageLoader::load`] call.
#[derive(Debug)]
pub enum LoadOutcome<R> {
    /// The fetch completed and is still the newest request.
    Loaded(Page<R>),
    /// The fetch failed and no newer request has started.
    Failed(SourceError),
    /// A newer request started before this one finished.
    Superseded,
}

impl<R> LoadOutcome<R> {
    /// Returns the loaded page, if any.
    pub fn page(&self) -> Option<&Page<R>> {
        match self {
            LoadOutcome::Loaded(page) => Some(page),
            _ => None,
        }
    }

    /// Returns `true` if a newer request superseded this one.
    pub fn is_superseded(&self) -> bool {
        matches!(self, LoadOutcome::Superseded)
    }
}
