//! Validating extractors.
//!
//! Each extractor decodes with the matching axum extractor and then runs
//! `validator::Validate`. Decode and validation failures both become
//! [`ApiError::Validation`] so every app answers with the same error body.

use aide::gen::GenContext;
use aide::openapi::Operation;
use aide::OperationInput;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::{Form, Json};
use routelab_models::FieldErrors;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::ApiError;

/// Message used when a required field is absent.
const REQUIRED: &str = "Required";

/// JSON body validated with `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// Form body validated with `Validate`. Accepts URL-encoded and
/// `multipart/form-data` bodies.
#[derive(Debug, Clone)]
pub struct ValidatedForm<T>(pub T);

/// Query string validated with `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

/// Path parameters validated with `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| decode_error("body", rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = if is_multipart(req.headers()) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| decode_error("form", rejection.body_text()))?;
            let fields = multipart_text_fields(multipart).await?;
            serde_json::from_value::<T>(Value::Object(fields))
                .map_err(|e| decode_error("form", e.to_string()))?
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| decode_error("form", rejection.body_text()))?;
            value
        };
        value.validate()?;
        Ok(Self(value))
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Text parts of a multipart body keyed by field name. File parts are
/// skipped and the last part wins for a repeated name.
async fn multipart_text_fields(mut multipart: Multipart) -> Result<Map<String, Value>, ApiError> {
    let mut fields = Map::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| decode_error("form", e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if field.file_name().is_some() {
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| decode_error("form", e.body_text()))?;
        fields.insert(name, Value::String(text));
    }

    Ok(fields)
}

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| decode_error("query", rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| decode_error("path", rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

// Each wrapper documents itself like the extractor it decodes with.
macro_rules! document_as {
    ($wrapper:ident, $inner:ident) => {
        impl<T: JsonSchema> OperationInput for $wrapper<T> {
            fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
                $inner::<T>::operation_input(ctx, operation);
            }
        }
    };
}

document_as!(ValidatedJson, Json);
document_as!(ValidatedForm, Form);
document_as!(ValidatedQuery, Query);
document_as!(ValidatedPath, Path);

/// Turn a decoder message into a field-keyed error.
///
/// Serde reports absent fields as ``missing field `name` ``; those are keyed
/// by the field name. Anything else is keyed by the request part.
fn decode_error(source: &str, text: String) -> ApiError {
    let errors = match missing_field(&text) {
        Some(field) => FieldErrors::single(field, REQUIRED),
        None => FieldErrors::single(source, text),
    };
    ApiError::Validation(errors)
}

fn missing_field(text: &str) -> Option<&str> {
    const MARKER: &str = "missing field `";
    let start = text.find(MARKER)? + MARKER.len();
    let len = text[start..].find('`')?;
    Some(&text[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_extraction() {
        assert_eq!(
            missing_field("Failed to deserialize query string: missing field `name`"),
            Some("name")
        );
        assert_eq!(missing_field("expected value at line 1 column 1"), None);
        assert_eq!(missing_field("missing field `unterminated"), None);
    }

    #[test]
    fn test_decode_error_keys() {
        let ApiError::Validation(errors) = decode_error("form", "missing field `title`".into())
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("title"), Some(REQUIRED));

        let ApiError::Validation(errors) = decode_error("body", "EOF while parsing".into()) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.get("body"), Some("EOF while parsing"));
    }
}
