/// Sync API tests: the `/api/sync` resource over in-memory and HTTP transports
///
/// Run with: cargo test --test sync_api_tests
use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use ephi::storage::{
    BlobStore, HttpRemoteStore, MemoryBlobStore, MemoryLocalStore, PROGRESS_BLOB, RemoteStore,
    write_local_progress,
};
use ephi::sync::ProgressSource;
use ephi::web::{AppState, build_router};
use ephi::{ProgressRecord, ProgressSync, ReadingPlan, ReadingTracker};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

fn app_with(blobs: Arc<MemoryBlobStore>) -> axum::Router {
    build_router(AppState::new(blobs))
}

fn app() -> axum::Router {
    app_with(Arc::new(MemoryBlobStore::new()))
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, headers, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    (status, headers, json)
}

async fn send_json(app: &axum::Router, method: Method, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build");

    let (status, _, body) = send(app, request).await;
    (status, body)
}

async fn send_empty(app: &axum::Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    let (status, _, body) = send(app, request).await;
    (status, body)
}

#[tokio::test]
async fn test_get_without_record_returns_empty_progress() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/api/sync").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "completedDays": [] }));
}

#[tokio::test]
async fn test_post_then_get_round_trips_record() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let app = app_with(blobs.clone());

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/sync",
        json!({ "completedDays": [1, 2, 5] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["url"].as_str().unwrap().ends_with(PROGRESS_BLOB));

    let (status, body) = send_empty(&app, Method::GET, "/api/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "completedDays": [1, 2, 5] }));

    assert!(blobs.get(PROGRESS_BLOB).await.unwrap().is_some());
}

#[tokio::test]
async fn test_post_replaces_previous_record() {
    let app = app();

    send_json(&app, Method::POST, "/api/sync", json!({ "completedDays": [1, 2, 3] })).await;
    send_json(&app, Method::POST, "/api/sync", json!({ "completedDays": [9] })).await;

    let (_, body) = send_empty(&app, Method::GET, "/api/sync").await;
    assert_eq!(body, json!({ "completedDays": [9] }));
}

#[tokio::test]
async fn test_delete_clears_record() {
    let app = app();
    send_json(&app, Method::POST, "/api/sync", json!({ "completedDays": [4] })).await;

    let (status, body) = send_empty(&app, Method::DELETE, "/api/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = send_empty(&app, Method::GET, "/api/sync").await;
    assert_eq!(body, json!({ "completedDays": [] }));

    // Deleting again is still a success.
    let (status, _) = send_empty(&app, Method::DELETE, "/api/sync").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_options_returns_ok() {
    let app = app();

    let (status, _) = send_empty(&app, Method::OPTIONS, "/api/sync").await;
    assert_eq!(status, StatusCode::OK);

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/sync")
        .header("origin", "https://reader.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = send(&app, preflight).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(headers.contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let app = app();

    for method in [Method::PUT, Method::PATCH] {
        let (status, body) =
            send_json(&app, method, "/api/sync", json!({ "completedDays": [1] })).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/sync")
        .header("origin", "https://reader.example")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_corrupt_blob_is_a_server_error() {
    let blobs = Arc::new(MemoryBlobStore::new());
    blobs
        .put(PROGRESS_BLOB, b"{\"completedDays\": [1,".to_vec())
        .await
        .unwrap();
    let app = app_with(blobs);

    let (status, body) = send_empty(&app, Method::GET, "/api/sync").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let blobs = Arc::new(MemoryBlobStore::new());
    let app = app_with(blobs.clone());

    let (status, body) = send_json(&app, Method::POST, "/api/sync", json!({ "completedDays": "all" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid progress payload"));
    assert!(blobs.get(PROGRESS_BLOB).await.unwrap().is_none());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/sync")
        .header("content-type", "application/json")
        .body(Body::from("{\"completedDays\": [1,"))
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_head_is_not_served_by_get() {
    let app = app();
    send_json(&app, Method::POST, "/api/sync", json!({ "completedDays": [1] })).await;

    let (status, _) = send_empty(&app, Method::HEAD, "/api/sync").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_healthcheck() {
    let (status, body) = send_empty(&app(), Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_http_remote_store_against_live_server() {
    let base = spawn_server().await;
    let remote = HttpRemoteStore::new(&base).unwrap();
    assert_eq!(remote.endpoint(), format!("{base}/api/sync"));

    let empty = remote.get().await.unwrap().unwrap();
    assert!(empty.completed_days.is_empty());

    remote
        .set(&ProgressRecord {
            completed_days: vec![1, 2, 3],
        })
        .await
        .unwrap();
    assert_eq!(remote.get().await.unwrap().unwrap().completed_days, vec![1, 2, 3]);

    remote.delete().await.unwrap();
    assert!(remote.get().await.unwrap().unwrap().completed_days.is_empty());
}

#[tokio::test]
async fn test_tracker_pushes_local_progress_to_live_server() {
    let base = spawn_server().await;
    let remote = Arc::new(HttpRemoteStore::new(&base).unwrap());
    let local = Arc::new(MemoryLocalStore::new());
    write_local_progress(local.as_ref(), &[1, 2].into()).unwrap();

    let sync = ProgressSync::new(remote.clone(), Duration::from_secs(60));
    let mut tracker = ReadingTracker::new(ReadingPlan::new_testament().unwrap(), local, sync);

    let outcome = tracker.load().await;
    assert_eq!(outcome.source, ProgressSource::Local);
    assert_eq!(outcome.pushed, Some(true));
    assert_eq!(remote.get().await.unwrap().unwrap().completed_days, vec![1, 2]);

    let toggle = tracker.toggle(3).unwrap();
    // The forced push at load opened the debounce window.
    assert!(toggle.remote_save.is_none());
    assert!(tracker.sync_now().await);
    assert_eq!(remote.get().await.unwrap().unwrap().completed_days, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_http_remote_store_reports_unreachable_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let remote = HttpRemoteStore::new(&format!("http://{addr}")).unwrap();
    assert!(remote.get().await.is_err());
}
