//! Todo list tests.

mod common;

use axum::http::StatusCode;
use routelab_api::AppKind;
use serde_json::json;

use common::{app, get, post_form, post_json, post_multipart, send};

#[tokio::test]
async fn test_create_and_list_todos() {
    let app = app(AppKind::Pages);

    let empty = get(&app, "/api/todo").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.json(), json!({ "todos": [] }));

    let created = send(&app, post_form("/api/todo", "id=1&title=first")).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json(), json!({ "message": "created!" }));

    send(&app, post_form("/api/todo", "id=2&title=second")).await;

    let list = get(&app, "/api/todo").await;
    assert_eq!(
        list.json(),
        json!({
            "todos": [
                { "id": "1", "title": "first" },
                { "id": "2", "title": "second" }
            ]
        })
    );
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let app = app(AppKind::Pages);
    let resp = send(&app, post_form("/api/todo", "id=1")).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json(), json!({ "code": 400, "message": { "title": "Required" } }));

    let list = get(&app, "/api/todo").await;
    assert_eq!(list.json(), json!({ "todos": [] }));
}

#[tokio::test]
async fn test_multipart_form_creates_todo() {
    let app = app(AppKind::Pages);
    let created = send(
        &app,
        post_multipart("/api/todo", &[("id", "1"), ("title", "first")]),
    )
    .await;

    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json(), json!({ "message": "created!" }));

    let list = get(&app, "/api/todo").await;
    assert_eq!(list.json(), json!({ "todos": [{ "id": "1", "title": "first" }] }));
}

#[tokio::test]
async fn test_multipart_missing_field_is_rejected() {
    let app = app(AppKind::Pages);
    let resp = send(&app, post_multipart("/api/todo", &[("id", "1")])).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json(), json!({ "code": 400, "message": { "title": "Required" } }));
}

#[tokio::test]
async fn test_json_body_is_not_a_form() {
    let app = app(AppKind::Pages);
    let resp = send(&app, post_json("/api/todo", json!({ "id": "1", "title": "x" }))).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.json()["message"]["form"].is_string());
}

#[tokio::test]
async fn test_routes_live_under_base_path() {
    let app = app(AppKind::Pages);
    let resp = get(&app, "/todo").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
