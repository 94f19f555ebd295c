//! Main app handlers: redirects and the different response formats.

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use routelab_models::ApiInfo;

/// Target of the `/` redirect.
pub const ROOT_REDIRECT: &str = "/api?pretty";

/// `302 Found` to the pretty-printed JSON API.
pub async fn root_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, ROOT_REDIRECT)])
}

pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        ok: true,
        msg: "Json API!".to_string(),
    })
}

pub async fn plain() -> &'static str {
    "Reply plain text"
}

/// Bare response with an explicit content type.
pub async fn raw() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain;charset=UTF-8")],
        "raw Response!",
    )
}

pub async fn html() -> Html<&'static str> {
    Html("<body style=\"color: blue\">\n  Hello html\n</body>")
}

pub async fn cf_workers() -> &'static str {
    "Hello Cloudflare Workers!"
}
