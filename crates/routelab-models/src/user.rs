//! User models for the documented app.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    /// User identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: i64,
}

/// Path parameters for `/users/{id}`.
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct UserPath {
    #[validate(length(min = 2, message = "String must contain at least 2 character(s)"))]
    pub id: String,
}
