//! API error types.

use aide::gen::GenContext;
use aide::openapi::{Operation, Response as ApiResponse};
use aide::OperationOutput;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use routelab_models::{ErrorBody, FieldErrors};
use thiserror::Error;
use validator::ValidationErrors;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Unauthorized {
        message: String,
        /// Value of the `WWW-Authenticate` header, if any
        challenge: Option<String>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0:?}")]
    Validation(FieldErrors),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: msg.into(),
            challenge: None,
        }
    }

    /// 401 carrying a `WWW-Authenticate` challenge.
    pub fn challenge(msg: impl Into<String>, challenge: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: msg.into(),
            challenge: Some(challenge.into()),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let code = self.status_code().as_u16();
        match self {
            ApiError::Validation(errors) => ErrorBody::new(code, errors.clone()),
            ApiError::Unauthorized { message, .. } => ErrorBody::new(code, message.as_str()),
            ApiError::BadRequest(msg) => ErrorBody::new(code, msg.as_str()),
            ApiError::Internal(_) => ErrorBody::new(code, self.to_string()),
        }
    }
}

/// Message that replaces internal error details in production.
pub const REDACTED_INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Extension set on responses rendered from [`ApiError::Internal`].
///
/// The body carries the error detail; `middleware::redact_internal_errors`
/// swaps it for [`REDACTED_INTERNAL_MESSAGE`] when the config says so.
#[derive(Debug, Clone, Copy)]
pub struct InternalErrorDetail;

/// Body of a redacted internal error.
pub fn redacted_internal_error() -> Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (status, Json(ErrorBody::new(status.as_u16(), REDACTED_INTERNAL_MESSAGE))).into_response()
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(FieldErrors::from(errors))
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.body();

        let mut response = (status, Json(body)).into_response();

        if matches!(self, ApiError::Internal(_)) {
            response.extensions_mut().insert(InternalErrorDetail);
        }

        if let ApiError::Unauthorized {
            challenge: Some(challenge),
            ..
        } = &self
        {
            if let Ok(value) = HeaderValue::from_str(challenge) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}

impl OperationOutput for ApiError {
    type Inner = ErrorBody;

    fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
        Json::<ErrorBody>::operation_response(ctx, operation)
    }
}
