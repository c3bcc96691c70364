//! HTTP fetcher tests against a local mock server

use axum::{Json, Router, http::StatusCode, routing::get};
use postcache::fetcher::{FetchError, HttpConfig, HttpFetcher, PostFetcher};
use postcache::posts::decode_posts;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// Start the mock server on an ephemeral port and return its base URL
async fn start_mock_server(hits: Arc<AtomicUsize>) -> String {
    let app = Router::new()
        .route(
            "/posts",
            get(|| async {
                Json(json!([
                    {"userId": 1, "id": 1, "title": "a", "body": "xx"},
                    {"userId": 2, "id": 2, "title": "b", "body": "yyy"}
                ]))
            }),
        )
        .route("/broken", get(|| async { "this is not json" }))
        .route(
            "/unavailable",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::SERVICE_UNAVAILABLE, "try later")
                }
            }),
        )
        .route(
            "/slow",
            get(|| async {
                sleep(Duration::from_secs(3)).await;
                Json(json!([]))
            }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let bound_addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", bound_addr)
}

fn fetcher(url: String) -> HttpFetcher {
    HttpFetcher::new(url, HttpConfig::default()).unwrap()
}

#[tokio::test]
async fn test_fetch_json_array() {
    let base = start_mock_server(Arc::new(AtomicUsize::new(0))).await;

    let value = fetcher(format!("{}/posts", base)).fetch().await.unwrap();
    let posts = decode_posts(value).unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].user_id, 2);
    assert_eq!(posts[1].body, "yyy");
}

#[tokio::test]
async fn test_error_status_is_transport_error_without_retry() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = start_mock_server(hits.clone()).await;

    let err = fetcher(format!("{}/unavailable", base))
        .fetch()
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, FetchError::Status { status: 503, .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_not_found_is_transport_error() {
    let base = start_mock_server(Arc::new(AtomicUsize::new(0))).await;

    let err = fetcher(format!("{}/nowhere", base)).fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let base = start_mock_server(Arc::new(AtomicUsize::new(0))).await;

    let err = fetcher(format!("{}/broken", base)).fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_request_timeout() {
    let base = start_mock_server(Arc::new(AtomicUsize::new(0))).await;
    let config = HttpConfig {
        request_timeout: Duration::from_millis(200),
        ..HttpConfig::default()
    };

    let err = HttpFetcher::new(format!("{}/slow", base), config)
        .unwrap()
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Bind then drop a listener to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher(format!("http://{}/posts", addr))
        .fetch()
        .await
        .unwrap_err();

    assert!(err.is_transport());
}
