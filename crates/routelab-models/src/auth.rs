//! Login and token models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginResponse {
    pub username: String,
    /// Signed HS256 token, send as `Authorization: Bearer <token>`
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,
}

/// JWT payload issued by `/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Claims {
    pub username: String,
    /// Expiration (seconds since epoch)
    pub exp: i64,
}
