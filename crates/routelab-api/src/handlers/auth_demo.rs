//! Routes guarded by the static bearer token and basic credentials.

use axum::Json;
use routelab_models::Message;

use crate::auth::{BasicAuth, BearerAuth};

pub async fn bearer_demo(_: BearerAuth) -> Json<Message> {
    Json(Message::new("bearer authed"))
}

pub async fn basic_demo(_: BasicAuth) -> Json<Message> {
    Json(Message::new("basic authed"))
}
