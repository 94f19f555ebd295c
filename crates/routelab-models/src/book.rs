//! Book demo models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct BookRequest {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Book {
    pub title: String,
}

impl From<BookRequest> for Book {
    fn from(request: BookRequest) -> Self {
        Self {
            title: request.title,
        }
    }
}
