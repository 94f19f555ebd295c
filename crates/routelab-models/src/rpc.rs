//! Types shared by the RPC server and its typed client.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /test`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct GreetingQuery {
    pub name: String,
}

impl GreetingQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Reply of `GET /test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Greeting {
    pub msg: String,
}

impl Greeting {
    pub fn for_name(name: &str) -> Self {
        Self {
            msg: format!("Hello {}", name),
        }
    }
}
