//! Ping and other utility handlers.

use axum::Json;
use routelab_models::Message;

/// `{"msg":"Pong"}`.
pub async fn ping() -> Json<Message> {
    Json(Message::pong())
}

/// Served but left out of the OpenAPI document.
pub async fn hidden() -> Json<Message> {
    Json(Message::new("not show in SwaggerUI Docs"))
}
