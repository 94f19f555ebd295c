//! Main app tests: JSON API, posts and response formats.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use routelab_api::routes::posts_app;
use routelab_api::{AppKind, AppState};
use serde_json::json;

use common::{app, get, get_with, post_json, send};

#[tokio::test]
async fn test_root_redirects_to_pretty_api() {
    let app = app(AppKind::Main);
    let resp = get(&app, "/").await;

    assert_eq!(resp.status, StatusCode::FOUND);
    assert_eq!(resp.header("location"), Some("/api?pretty"));
}

#[tokio::test]
async fn test_api_info() {
    let app = app(AppKind::Main);
    let resp = get(&app, "/api").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({ "ok": true, "msg": "Json API!" }));
    assert!(!resp.text().contains('\n'));
}

#[tokio::test]
async fn test_api_info_pretty() {
    let app = app(AppKind::Main);
    let resp = get(&app, "/api?pretty").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.text().contains("\n  \"ok\": true"));
    assert_eq!(resp.json(), json!({ "ok": true, "msg": "Json API!" }));
}

#[tokio::test]
async fn test_ping() {
    let app = app(AppKind::Main);
    let resp = get(&app, "/ping").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({ "msg": "Pong" }));
    // Registered ahead of the etag layer
    assert!(resp.header("etag").is_none());
}

#[tokio::test]
async fn test_etag_and_not_modified() {
    let app = app(AppKind::Main);
    let first = get(&app, "/plain").await;
    let tag = first.header("etag").expect("etag header").to_string();

    let second = send(&app, get_with("/plain", "If-None-Match", &tag)).await;
    assert_eq!(second.status, StatusCode::NOT_MODIFIED);
    assert!(second.body.is_empty());
    assert_eq!(second.header("etag"), Some(tag.as_str()));

    let stale = send(&app, get_with("/plain", "If-None-Match", "\"stale\"")).await;
    assert_eq!(stale.status, StatusCode::OK);
    assert_eq!(stale.text(), "Reply plain text");
}

#[tokio::test]
async fn test_formats() {
    let app = app(AppKind::Main);

    let plain = get(&app, "/plain").await;
    assert_eq!(plain.text(), "Reply plain text");

    let raw = get(&app, "/raw").await;
    assert_eq!(raw.text(), "raw Response!");
    assert_eq!(raw.header("content-type"), Some("text/plain;charset=UTF-8"));

    let html = get(&app, "/html").await;
    assert!(html.header("content-type").unwrap().starts_with("text/html"));
    assert!(html.text().contains("Hello html"));

    let cf = get(&app, "/vendor/cf-works").await;
    assert_eq!(cf.text(), "Hello Cloudflare Workers!");
}

#[tokio::test]
async fn test_get_post() {
    let app = app(AppKind::Main);
    let resp = get(&app, "/posts/1").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("x-message"), Some("Hi!"));
    assert_eq!(resp.text(), "post id=1");
}

#[tokio::test]
async fn test_create_post() {
    let app = app(AppKind::Main);

    let empty = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/posts")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(empty.status, StatusCode::CREATED);
    assert_eq!(empty.text(), "Created!");

    let with_json = send(&app, post_json("/posts", json!({ "message": "hello" }))).await;
    assert_eq!(with_json.status, StatusCode::CREATED);
    assert_eq!(with_json.text(), "Created!");
}

#[tokio::test]
async fn test_create_post_with_form_data() {
    let app = app(AppKind::Main);
    let body = "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"message\"\r\n\r\nhello\r\n--XBOUNDARY--\r\n";

    let resp = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/posts")
            .header("Content-Type", "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.text(), "Created!");
}

#[tokio::test]
async fn test_delete_post() {
    let app = app(AppKind::Main);
    let resp = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/posts/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "Post id=1 is deleted!");
}

#[tokio::test]
async fn test_posts_app_on_its_own() {
    let posts = posts_app().with_state(AppState::default());
    let resp = get(&posts, "/ping").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "Pong");
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = app(AppKind::Main);

    let resp = get(&app, "/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["status"], "healthy");
    assert!(resp.header("x-request-id").is_some());

    let resp = send(&app, get_with("/health", "X-Request-ID", "req-42")).await;
    assert_eq!(resp.header("x-request-id"), Some("req-42"));
}

#[tokio::test]
async fn test_metrics_route_absent_without_handle() {
    let app = app(AppKind::Main);
    let resp = get(&app, "/metrics").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
