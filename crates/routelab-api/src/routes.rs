//! API routes.
//!
//! Each demo app is its own router; the binary serves one of them.

use aide::axum::routing::{get_with, post_with};
use aide::axum::ApiRouter;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use routelab_models::{Book, ErrorBody, LoginResponse, Message, User};
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::AppKind;
use crate::handlers::{
    api_info, basic_demo, bearer_demo, cf_workers, create_book, create_post, create_todo,
    delete_post, get_post, get_user, health, hidden, html, list_todos, login, ping, plain,
    posts_ping, profile, raw, root_redirect, ProfileResponse,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{etag, pretty_json, redact_internal_errors, request_id, request_logging};
use crate::openapi::{base_document, doc_route, security_schemes, swagger_route};
use crate::rpc::{greet, TEST_PATH};
use crate::state::AppState;
use crate::ws::ws_echo;

/// Base path the pages app is mounted under.
pub const PAGES_BASE_PATH: &str = "/api";

/// Path of the OpenAPI document.
pub const DOC_PATH: &str = "/openapi";

/// Create the router for `kind`, wrapped in the shared layers.
pub fn create_router(kind: AppKind, state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let app = match kind {
        AppKind::Main => main_app(),
        AppKind::WebSocket => websocket_app(),
        AppKind::Rpc => rpc_app(),
        AppKind::OpenApi => openapi_app(),
        AppKind::Pages => pages_app(),
    };

    let health_routes = Router::new().route("/health", get(health));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    let max_body_size = state.config.max_body_size;

    app.merge(health_routes)
        .merge(metrics_routes)
        .layer(middleware::from_fn_with_state(state.clone(), redact_internal_errors))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Posts stub, mountable on its own.
pub fn posts_app() -> Router<AppState> {
    Router::new()
        .route("/ping", get(posts_ping))
        .route("/", post(create_post))
        .route("/:id", get(get_post).delete(delete_post))
}

/// JSON API, posts and the response-format routes.
pub fn main_app() -> Router<AppState> {
    // Registered before the etag/logging layers, like the first route of the app
    let ping_routes = Router::new().route("/ping", get(ping));

    let api_routes = Router::new()
        .route("/api", get(api_info))
        .layer(middleware::from_fn(pretty_json));

    let app_routes = Router::new()
        .route("/", get(root_redirect))
        .merge(api_routes)
        .nest("/posts", posts_app())
        .route("/plain", get(plain))
        .route("/raw", get(raw))
        .route("/html", get(html))
        .route("/vendor/cf-works", get(cf_workers))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(etag));

    ping_routes.merge(app_routes)
}

/// `/ping` plus the `/ws` echo socket.
pub fn websocket_app() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/ws", get(ws_echo))
        .layer(middleware::from_fn(request_logging))
}

/// Server half of the typed RPC pair.
pub fn rpc_app() -> Router<AppState> {
    Router::new()
        .route(TEST_PATH, get(greet))
        .layer(middleware::from_fn(request_logging))
}

/// Todo list mounted under [`PAGES_BASE_PATH`].
pub fn pages_app() -> Router<AppState> {
    let todo_routes = Router::new().route("/todo", post(create_todo).get(list_todos));

    Router::new()
        .nest(PAGES_BASE_PATH, todo_routes)
        .layer(middleware::from_fn(request_logging))
}

/// Documented routes, the OpenAPI document and Swagger UI.
pub fn openapi_app() -> Router<AppState> {
    aide::gen::extract_schemas(true);

    let mut api = base_document();

    let documented = ApiRouter::<AppState>::new()
        .api_route(
            "/users/:id",
            get_with(get_user, |op| {
                op.tag("Users")
                    .summary("Get a user by ID")
                    .response_with::<200, Json<User>, _>(|res| res.description("Retrieve the user"))
                    .response_with::<400, Json<ErrorBody>, _>(|res| res.description("Returns an error"))
            }),
        )
        .api_route(
            "/login",
            post_with(login, |op| {
                op.tag("Users")
                    .summary("User login and gen jwt token")
                    .response_with::<200, Json<LoginResponse>, _>(|res| res.description("Retrieve the user"))
                    .response_with::<400, Json<ErrorBody>, _>(|res| res.description("Returns an error"))
                    .response_with::<401, Json<ErrorBody>, _>(|res| res.description("Invalid credentials"))
            }),
        )
        .api_route(
            "/profile",
            get_with(profile, |op| {
                op.tag("Users")
                    .summary("Get user info by jwt token")
                    .description("Set the token with Authorize above. Get the JWT from the login response")
                    .security_requirement("JWT")
                    .response_with::<200, Json<ProfileResponse>, _>(|res| res.description("Success message"))
                    .response_with::<401, Json<ErrorBody>, _>(|res| res.description("Unauthorized"))
            }),
        )
        .api_route(
            "/books",
            post_with(create_book, |op| {
                op.tag("Books")
                    .summary("Create a Book")
                    .response_with::<200, Json<Book>, _>(|res| res.description("Success message"))
            }),
        )
        .api_route(
            "/auth/bearer",
            get_with(bearer_demo, |op| {
                op.tag("Auth")
                    .summary("Test bearer auth")
                    .security_requirement("Bearer")
                    .response_with::<200, Json<Message>, _>(|res| res.description("Success message"))
            }),
        )
        .api_route(
            "/auth/basic",
            get_with(basic_demo, |op| {
                op.tag("Auth")
                    .summary("Test basic auth")
                    .security_requirement("Basic")
                    .response_with::<200, Json<Message>, _>(|res| res.description("Success message"))
            }),
        )
        .api_route(
            "/ping",
            get_with(ping, |op| {
                op.tag("Tools")
                    .summary("Ping Pong test")
                    .response_with::<200, Json<Message>, _>(|res| res.description("Success message"))
            }),
        )
        // Served but left out of the document
        .route("/hidden", get(hidden))
        .finish_api_with(&mut api, security_schemes);

    documented
        .route(DOC_PATH, doc_route(api))
        .route("/", swagger_route(DOC_PATH, "API Docs"))
        .layer(middleware::from_fn(pretty_json))
        .layer(middleware::from_fn(request_logging))
}
