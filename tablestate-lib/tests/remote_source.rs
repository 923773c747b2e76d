//! RemoteSource behavior against a local stub endpoint.
//!
//! Each test spins up a minimal hyper server on an ephemeral port, points a
//! `RemoteSource` at it, and checks what goes over the wire in both
//! directions: the forwarded query string on the way out, and the decoded
//! page or error taxonomy on the way back.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use tablestate_lib::query::{SortKey, ViewState};
use tablestate_lib::source::{DataSource, RemoteSource};
use tablestate_lib::SourceError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Person {
    id: u32,
    name: String,
    age: u32,
}

const PAGE_JSON: &str = r#"{"rows":[{"id":1,"name":"John","age":40},{"id":2,"name":"Alex","age":23}],"totalCount":1000}"#;

/// What the stub sends back for every request it receives.
#[derive(Clone)]
enum StubReply {
    Json(&'static str),
    Status(StatusCode, &'static str),
    DelayedJson(Duration, &'static str),
}

/// Starts a one-endpoint server on an ephemeral port. Every received query
/// string is pushed into the returned channel.
async fn spawn_stub(reply: StubReply) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let io = TokioIo::new(stream);
            let tx = tx.clone();
            let reply = reply.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let tx = tx.clone();
                    let reply = reply.clone();
                    async move {
                        let _ = tx.send(req.uri().query().unwrap_or("").to_string());

                        let response = match reply {
                            StubReply::Json(body) => json_response(StatusCode::OK, body),
                            StubReply::Status(status, body) => Response::builder()
                                .status(status)
                                .body(Full::new(Bytes::from(body)))
                                .unwrap(),
                            StubReply::DelayedJson(delay, body) => {
                                tokio::time::sleep(delay).await;
                                json_response(StatusCode::OK, body)
                            }
                        };
                        Ok::<_, Infallible>(response)
                    }
                });
                let _ = http1::Builder::new().serve_connection(io, service).await;
            });
        }
    });

    (addr, rx)
}

fn json_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn source_for(addr: SocketAddr) -> RemoteSource<Person> {
    RemoteSource::new(format!("http://{}/rows", addr))
}

#[tokio::test]
async fn test_forwards_full_view_state_upstream() {
    let (addr, mut seen) = spawn_stub(StubReply::Json(PAGE_JSON)).await;
    let source = source_for(addr);

    let page = source
        .fetch(&ViewState::new(2, 25, SortKey::desc("age")))
        .await
        .unwrap();

    assert_eq!(
        seen.recv().await.unwrap(),
        "page-index=2&page-size=25&sort-desc=true&sort-id=age",
    );
    assert_eq!(page.total_count(), 1000);
    assert_eq!(page.len(), 2);
    assert_eq!(page.rows()[0].name, "John");
}

#[tokio::test]
async fn test_pagination_passes_through_verbatim() {
    let (addr, mut seen) = spawn_stub(StubReply::Json(PAGE_JSON)).await;
    let source = source_for(addr);

    source
        .fetch(&ViewState::new(0, 10, SortKey::asc("id")))
        .await
        .unwrap();
    source
        .fetch(&ViewState::new(7, 50, SortKey::asc("id")))
        .await
        .unwrap();

    assert!(seen.recv().await.unwrap().starts_with("page-index=0&page-size=10"));
    assert!(seen.recv().await.unwrap().starts_with("page-index=7&page-size=50"));
}

#[tokio::test]
async fn test_http_error_surfaces_status_and_body() {
    let (addr, _seen) = spawn_stub(StubReply::Status(
        StatusCode::BAD_GATEWAY,
        "upstream down",
    ))
    .await;
    let source = source_for(addr);

    let error = source.fetch(&ViewState::default()).await.unwrap_err();
    assert_eq!(error.status_code(), Some(502));
    match error {
        SourceError::Http { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream down");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let (addr, _seen) = spawn_stub(StubReply::Json("this is not a page")).await;
    let source = source_for(addr);

    let error = source.fetch(&ViewState::default()).await.unwrap_err();
    match error {
        SourceError::Decode { body, .. } => {
            assert_eq!(body.as_deref(), Some("this is not a page"));
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let (addr, _seen) = spawn_stub(StubReply::DelayedJson(
        Duration::from_secs(5),
        PAGE_JSON,
    ))
    .await;
    let source = source_for(addr).with_timeout(Duration::from_millis(50));

    let error = source.fetch(&ViewState::default()).await.unwrap_err();
    assert!(error.is_timeout(), "got {:?}", error);
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    // Bind and immediately drop the listener so the port is closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = source_for(addr);
    let error = source.fetch(&ViewState::default()).await.unwrap_err();
    assert!(matches!(error, SourceError::Network(_)), "got {:?}", error);
}
