//! Posts stub handlers. Nothing is persisted.

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::debug;

pub async fn posts_ping() -> &'static str {
    "Pong"
}

/// Echo the post id with an `X-Message` header.
pub async fn get_post(Path(id): Path<String>) -> impl IntoResponse {
    ([("X-Message", "Hi!")], format!("post id={}", id))
}

/// Accept any body (none, JSON or form-data) and answer 201.
pub async fn create_post(body: Bytes) -> impl IntoResponse {
    debug!(bytes = body.len(), "Post submitted");
    (StatusCode::CREATED, "Created!")
}

pub async fn delete_post(Path(id): Path<String>) -> String {
    format!("Post id={} is deleted!", id)
}
