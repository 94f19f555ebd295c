//! Prometheus metrics for the API server.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use regex_lite::Regex;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "routelab_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "routelab_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "routelab_http_requests_in_flight";

    // WebSocket metrics
    pub const WS_CONNECTIONS_TOTAL: &str = "routelab_ws_connections_total";
    pub const WS_CONNECTIONS_ACTIVE: &str = "routelab_ws_connections_active";
    pub const WS_MESSAGES_RECEIVED: &str = "routelab_ws_messages_received_total";
    pub const WS_MESSAGES_SENT: &str = "routelab_ws_messages_sent_total";

    // Demo data
    pub const TODOS_CREATED_TOTAL: &str = "routelab_todos_created_total";
    pub const AUTH_FAILURES_TOTAL: &str = "routelab_auth_failures_total";
}

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[0-9]+(/|$)").expect("valid regex"));
static ID_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(posts|users)/[^/]+").expect("valid regex"));

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record WebSocket connection.
pub fn record_ws_connection(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::WS_CONNECTIONS_TOTAL, &labels).increment(1);
}

/// Update active WebSocket connections gauge.
pub fn set_ws_active_connections(count: i64) {
    gauge!(names::WS_CONNECTIONS_ACTIVE).set(count as f64);
}

/// Record WebSocket message received.
pub fn record_ws_message_received(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::WS_MESSAGES_RECEIVED, &labels).increment(1);
}

/// Record WebSocket message sent.
pub fn record_ws_message_sent(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::WS_MESSAGES_SENT, &labels).increment(1);
}

/// Record a stored todo.
pub fn record_todo_created() {
    counter!(names::TODOS_CREATED_TOTAL).increment(1);
}

/// Record a failed authentication attempt for `scheme` (login, jwt, bearer
/// or basic).
pub fn record_auth_failure(scheme: &str) {
    let labels = [("scheme", scheme.to_string())];
    counter!(names::AUTH_FAILURES_TOTAL, &labels).increment(1);
}

/// Sanitize path for metrics labels (replace IDs with placeholders).
fn sanitize_path(path: &str) -> String {
    let path = ID_SEGMENT.replace_all(path, "/$1/:id");
    let path = NUMERIC_SEGMENT.replace_all(&path, "/:id$1");
    path.to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/posts/42"), "/posts/:id");
        assert_eq!(sanitize_path("/users/abc"), "/users/:id");
        assert_eq!(sanitize_path("/api/todo"), "/api/todo");
        assert_eq!(sanitize_path("/items/7/detail"), "/items/:id/detail");
    }
}
