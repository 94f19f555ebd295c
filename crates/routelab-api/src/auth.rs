//! JWT, bearer and basic authentication.
//!
//! Each scheme is an axum extractor over [`AppState`], so a handler opts in
//! by naming the extractor in its arguments.

use aide::OperationInput;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::{Basic, Bearer};
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use routelab_models::Claims;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;

const BEARER_CHALLENGE: &str = "Bearer realm=\"\"";
const INVALID_TOKEN_CHALLENGE: &str = "Bearer realm=\"\", error=\"invalid_token\"";
const INVALID_REQUEST_CHALLENGE: &str = "Bearer realm=\"\", error=\"invalid_request\"";
const BASIC_CHALLENGE: &str = "Basic realm=\"Secure Area\"";

/// Sign an HS256 token for `username`, valid for the configured TTL.
pub fn issue_token(auth: &AuthConfig, username: &str) -> Result<String, ApiError> {
    let claims = Claims {
        username: username.to_string(),
        exp: Utc::now().timestamp() + auth.jwt_ttl.as_secs() as i64,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))
}

/// Verify an HS256 token and return its claims.
pub fn verify_token(auth: &AuthConfig, token: &str) -> Result<Claims, ApiError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!("JWT verification failed: {}", e);
        ApiError::challenge("Unauthorized", INVALID_TOKEN_CHALLENGE)
    })?;

    Ok(token_data.claims)
}

/// Compare secrets without short-circuiting on the first differing byte.
fn secrets_match(given: &str, expected: &str) -> bool {
    let a = Sha256::digest(given.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn has_authorization(parts: &Parts) -> bool {
    parts.headers.contains_key(header::AUTHORIZATION)
}

/// Extract the static bearer token, distinguishing a missing header (401)
/// from a malformed one (400).
async fn bearer_token(parts: &mut Parts) -> Result<String, ApiError> {
    match parts.extract::<TypedHeader<Authorization<Bearer>>>().await {
        Ok(TypedHeader(Authorization(bearer))) => Ok(bearer.token().to_string()),
        Err(_) if has_authorization(parts) => {
            Err(ApiError::bad_request("Invalid Authorization header format"))
        }
        Err(_) => Err(ApiError::challenge("Unauthorized", BEARER_CHALLENGE)),
    }
}

/// Caller authenticated with a JWT issued by `/login`.
#[derive(Debug, Clone)]
pub struct JwtUser(pub Claims);

#[axum::async_trait]
impl FromRequestParts<AppState> for JwtUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Unlike the static bearer route, any unusable header is a 401 here
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                metrics::record_auth_failure("jwt");
                ApiError::challenge("Unauthorized", INVALID_REQUEST_CHALLENGE)
            })?;
        let claims = verify_token(&state.config.auth, bearer.token()).inspect_err(|_| {
            metrics::record_auth_failure("jwt");
        })?;
        Ok(JwtUser(claims))
    }
}

/// Caller presented the static bearer token.
#[derive(Debug, Clone, Copy)]
pub struct BearerAuth;

#[axum::async_trait]
impl FromRequestParts<AppState> for BearerAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).await?;
        if secrets_match(&token, &state.config.auth.bearer_token) {
            Ok(BearerAuth)
        } else {
            metrics::record_auth_failure("bearer");
            Err(ApiError::challenge("Unauthorized", INVALID_TOKEN_CHALLENGE))
        }
    }
}

/// Caller presented valid basic credentials.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for BasicAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) = parts
            .extract::<TypedHeader<Authorization<Basic>>>()
            .await
            .map_err(|_| ApiError::challenge("Unauthorized", BASIC_CHALLENGE))?;

        let auth = &state.config.auth;
        // Evaluate both comparisons so timing doesn't reveal which one failed
        let user_ok = secrets_match(basic.username(), &auth.basic_username);
        let pass_ok = secrets_match(basic.password(), &auth.basic_password);

        if user_ok & pass_ok {
            Ok(BasicAuth {
                username: basic.username().to_string(),
            })
        } else {
            metrics::record_auth_failure("basic");
            Err(ApiError::challenge("Unauthorized", BASIC_CHALLENGE))
        }
    }
}

// Documented through the operation's security requirement.
impl OperationInput for JwtUser {}
impl OperationInput for BearerAuth {}
impl OperationInput for BasicAuth {}
