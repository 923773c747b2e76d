//! Externally-paged data source backed by an HTTP endpoint.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::DataSource;
use crate::error::SourceError;
use crate::query::codec;
use crate::query::Page;
use crate::query::QueryParams;
use crate::query::ViewState;

/// Default deadline for a single page request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A data source that fetches exactly one page per request from an HTTP
/// endpoint.
///
/// The full view state is forwarded upstream, sort criteria included, so
/// the endpoint owns the sort order and the returned slice is correct
/// across the whole data set. The endpoint must answer
/// `GET {endpoint}?page-index=..&page-size=..&sort-desc=..&sort-id=..`
/// with a JSON body of `{"rows": [...], "totalCount": n}`.
///
/// # Example
///
/// ```ignore
/// use tablestate_lib::source::RemoteSource;
///
/// let source: RemoteSource<Person> = RemoteSource::new("http://127.0.0.1:8350/rows")
///     .with_timeout(Duration::from_secs(5));
/// let page = source.fetch(&state).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RemoteSource<R> {
    endpoint: String,
    http_client: Client,
    timeout: Duration,
    _row: PhantomData<fn() -> R>,
}

impl<R> RemoteSource<R> {
    /// Creates a source over the given page endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client: Client::new(),
            timeout: DEFAULT_TIMEOUT,
            _row: PhantomData,
        }
    }

    /// Sets the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses an existing HTTP client instead of building a fresh one.
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Returns the page endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the request URL for a view state.
    fn page_url(&self, state: &ViewState) -> String {
        let mut params = QueryParams::new();
        codec::encode(state, &mut params);
        format!(
            "{}?{}",
            self.endpoint.trim_end_matches('/'),
            params.to_query_string()
        )
    }

    fn classify(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else {
            SourceError::Network(error)
        }
    }
}

#[async_trait]
impl<R> DataSource for RemoteSource<R>
where
    R: DeserializeOwned + Send + Sync,
{
    type Row = R;

    async fn fetch(&self, state: &ViewState) -> Result<Page<R>, SourceError> {
        let url = self.page_url(state);

        let response = self
            .http_client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::http(status.as_u16(), message));
        }

        // Read the body as text first so a malformed payload can be
        // reported alongside the decode error.
        let body = response.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&body).map_err(|e| SourceError::decode_with_body(e.to_string(), body))
    }
}
