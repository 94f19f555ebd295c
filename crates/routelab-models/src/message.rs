//! Small reply envelopes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `{ "msg": ... }` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    pub msg: String,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }

    pub fn pong() -> Self {
        Self::new("Pong")
    }
}

/// Reply of the main app's `/api` route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiInfo {
    pub ok: bool,
    pub msg: String,
}
