//! HTTP server: the table page and the row endpoint.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use tablestate_lib::query::{codec, QueryParams, ViewState};
use tablestate_lib::source::{
    sort_and_slice, DataSource, InMemorySource, LoadOutcome, PageLoader, RemoteSource,
};

use crate::config::{ServerConfig, SourceMode};
use crate::data::{make_rows, Person};
use crate::render;

/// The demo application: one owned row store, one data-source strategy
/// chosen at startup, and the loader coordinating fetches against it.
pub struct App {
    store: Arc<Vec<Person>>,
    loader: PageLoader<Person>,
    defaults: ViewState,
    fetch_delay: Option<Duration>,
}

impl App {
    /// Builds the row store and the configured data source.
    pub fn new(config: &ServerConfig) -> Self {
        let store = Arc::new(make_rows(config.row_count, config.seed));

        let source: Arc<dyn DataSource<Row = Person>> = match &config.mode {
            SourceMode::Local => {
                log::info!("Serving {} rows from the local store", store.len());
                Arc::new(InMemorySource::from_arc(store.clone()))
            }
            SourceMode::Remote { upstream } => {
                log::info!("Fetching pages from {}", upstream);
                Arc::new(RemoteSource::new(upstream.clone()))
            }
        };

        Self {
            store,
            loader: PageLoader::new(source),
            defaults: ViewState::default(),
            fetch_delay: config.fetch_delay,
        }
    }

    /// Accepts connections until Ctrl+C.
    pub async fn serve(self: Arc<Self>, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        log::info!("Listening on http://{}", addr);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Shutting down");
                    break;
                }
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    let io = TokioIo::new(stream);
                    let app = self.clone();

                    tokio::spawn(async move {
                        let service = service_fn(move |req: Request<Incoming>| {
                            let app = app.clone();
                            async move { Ok::<_, Infallible>(app.handle(req).await) }
                        });

                        // Browsers drop keep-alive connections freely.
                        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                            log::debug!("Connection from {} ended: {}", peer, e);
                        }
                    });
                }
            }
        }

        Ok(())
    }

    async fn handle(&self, req: Request<Incoming>) -> Response<Full<Bytes>> {
        let query = req.uri().query().unwrap_or("").to_string();

        match (req.method(), req.uri().path()) {
            (&Method::GET, "/") => self.table_page(&query).await,
            (&Method::GET, "/rows") => self.rows_page(&query).await,
            _ => text(StatusCode::NOT_FOUND, "not found"),
        }
    }

    /// `GET /` - the table, after normalizing the URL.
    ///
    /// A URL missing any owned parameter redirects to one where the gaps
    /// are filled with defaults, so the address bar always shows the full
    /// view state. Parameters that are present, including malformed ones,
    /// are left alone; they resolve through the codec instead.
    async fn table_page(&self, query: &str) -> Response<Full<Bytes>> {
        let mut params = QueryParams::parse(query);

        if codec::fill_missing(&mut params, &self.defaults) {
            let location = format!("/?{}", params.to_query_string());
            log::debug!("Redirecting to canonical URL {}", location);
            return redirect(&location);
        }

        let state = codec::decode(&params, &self.defaults);
        log::debug!(
            "Loading page {} (size {}, sort {} {:?})",
            state.page_index,
            state.page_size,
            state.sort.field(),
            state.sort.direction(),
        );

        match self.loader.load(&state).await {
            LoadOutcome::Loaded(page) => {
                html(StatusCode::OK, render::table_page(&state, &page, &params))
            }
            LoadOutcome::Failed(error) => {
                log::error!("Fetch failed: {}", error);
                html(StatusCode::BAD_GATEWAY, render::error_page(&error.to_string()))
            }
            LoadOutcome::Superseded => {
                log::debug!("Response superseded by a newer request");
                empty(StatusCode::NO_CONTENT)
            }
        }
    }

    /// `GET /rows` - one page of rows as JSON.
    ///
    /// This is the endpoint remote mode fetches from. It never redirects;
    /// absent parameters simply decode to defaults. The full view state is
    /// honored here, sort included, so remote pages are sliced from the
    /// globally sorted order.
    async fn rows_page(&self, query: &str) -> Response<Full<Bytes>> {
        let params = QueryParams::parse(query);
        let state = codec::decode(&params, &self.defaults);

        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }

        let page = sort_and_slice(&self.store, &state);
        match serde_json::to_string(&page) {
            Ok(body) => json(StatusCode::OK, body),
            Err(e) => {
                log::error!("Failed to serialize page: {}", e);
                text(StatusCode::INTERNAL_SERVER_ERROR, "serialization failed")
            }
        }
    }
}

// =============================================================================
// Response helpers
// =============================================================================

fn html(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn json(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn text(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn empty(status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .unwrap()
}

fn redirect(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header("Location", location)
        .body(Full::new(Bytes::new()))
        .unwrap()
}
