//! API middleware.

use std::time::Instant;

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::State;
use axum::http::header::{self, HeaderMap};
use axum::http::{HeaderValue, Method, Request, Response, StatusCode};
use axum::middleware::Next;
use axum::response::IntoResponse;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{redacted_internal_error, InternalErrorDetail};
use crate::state::AppState;

/// Request ID middleware.
pub async fn request_id(
    mut request: Request<Body>,
    next: Next,
) -> Response<Body> {
    // Generate or extract request ID
    let request_id = request
        .headers()
        .get("X-Request-ID")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-ID", header_value);
    }

    response
}

/// Request logging middleware.
pub async fn request_logging(
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration = start.elapsed();

    // Skip health check logging
    if uri.path() != "/health" && uri.path() != "/metrics" {
        info!(
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

/// Internal error redaction middleware.
///
/// Replaces the detail of internal errors with a generic message when the
/// app runs in production.
pub async fn redact_internal_errors(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let response = next.run(request).await;

    if state.config.is_production() && response.extensions().get::<InternalErrorDetail>().is_some() {
        warn!(status = %response.status(), "Redacting internal error");
        return redacted_internal_error();
    }

    response
}

/// Strong ETag for a response body.
pub fn etag_for(body: &[u8]) -> String {
    format!("\"{:x}\"", Sha256::digest(body))
}

/// Whether an `If-None-Match` header matches `tag`. Weak validators compare
/// equal to their strong form.
fn if_none_match(headers: &HeaderMap, tag: &str) -> bool {
    let Some(value) = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    value.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == tag
    })
}

async fn buffer(body: Body) -> Result<Bytes, Response<Body>> {
    to_bytes(body, usize::MAX).await.map_err(|e| {
        warn!("Failed to buffer response body: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

/// ETag middleware.
///
/// Tags successful GET/HEAD responses and answers `304 Not Modified` when
/// the client already holds the current representation.
pub async fn etag(
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let method = request.method().clone();
    let request_headers = request.headers().clone();

    let response = next.run(request).await;

    if !(method == Method::GET || method == Method::HEAD)
        || !response.status().is_success()
        || response.headers().contains_key(header::ETAG)
    {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match buffer(body).await {
        Ok(bytes) => bytes,
        Err(response) => return response,
    };

    let tag = etag_for(&bytes);
    if let Ok(value) = HeaderValue::from_str(&tag) {
        parts.headers.insert(header::ETAG, value);
    }

    if if_none_match(&request_headers, &tag) {
        parts.status = StatusCode::NOT_MODIFIED;
        parts.headers.remove(header::CONTENT_LENGTH);
        parts.headers.remove(header::CONTENT_TYPE);
        return Response::from_parts(parts, Body::empty());
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// `?pretty` or `?pretty=<anything>` in the query string.
fn wants_pretty(query: Option<&str>) -> bool {
    query
        .map(|q| {
            q.split('&')
                .any(|pair| pair.split('=').next() == Some("pretty"))
        })
        .unwrap_or(false)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false)
}

/// Pretty JSON middleware.
///
/// Re-indents JSON responses with two spaces when the query string asks
/// for it. Other responses pass through untouched.
pub async fn pretty_json(
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let pretty = wants_pretty(request.uri().query());

    let response = next.run(request).await;

    if !pretty || !is_json(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match buffer(body).await {
        Ok(bytes) => bytes,
        Err(response) => return response,
    };

    let pretty = serde_json::from_slice::<serde_json::Value>(&bytes)
        .ok()
        .and_then(|value| serde_json::to_vec_pretty(&value).ok());

    match pretty {
        Some(out) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(out))
        }
        None => Response::from_parts(parts, Body::from(bytes)),
    }
}
