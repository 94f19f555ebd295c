//! User handlers of the documented app.

use axum::extract::State;
use axum::Json;
use routelab_models::{Claims, LoginRequest, LoginResponse, User, UserPath};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{info, warn};

use crate::auth::{issue_token, JwtUser};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::metrics;
use crate::state::AppState;

/// Fixed demo user for any valid id.
pub async fn get_user(ValidatedPath(path): ValidatedPath<UserPath>) -> Json<User> {
    Json(User {
        id: path.id,
        age: 20,
        name: "Ultra-man".to_string(),
    })
}

/// Check the demo credentials and issue a JWT.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let auth = &state.config.auth;

    if request.username != auth.demo_username || request.password != auth.demo_password {
        warn!(username = %request.username, "Login rejected");
        metrics::record_auth_failure("login");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = issue_token(auth, &request.username)?;
    info!(username = %request.username, "Issued JWT");

    Ok(Json(LoginResponse {
        username: request.username,
        jwt_token: token,
    }))
}

/// Token claims plus a status message.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub claims: Claims,
    pub msg: String,
}

pub async fn profile(JwtUser(claims): JwtUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        claims,
        msg: "jwt authed".to_string(),
    })
}
