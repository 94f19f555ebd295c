//! OpenAPI document and Swagger UI.
//!
//! Operations are collected by `aide` while the documented routes are
//! registered; schemas come from the `JsonSchema` derives on the models.

use std::sync::Arc;

use aide::openapi::{Info, OpenApi, SecurityScheme, Server};
use aide::swagger::Swagger;
use aide::transform::TransformOpenApi;
use axum::http::{header, HeaderMap};
use axum::routing::{get, MethodRouter};
use axum::Json;

/// Title of the generated document.
pub const DOC_TITLE: &str = "OpenAPI Docs by SwaggerUI";

/// Document skeleton filled in by `finish_api`.
pub fn base_document() -> OpenApi {
    OpenApi {
        info: Info {
            title: DOC_TITLE.to_string(),
            version: "1".to_string(),
            description: Some("OpenAPI Lab, add more description here...".to_string()),
            ..Info::default()
        },
        ..OpenApi::default()
    }
}

fn http_scheme(scheme: &str, bearer_format: Option<&str>) -> SecurityScheme {
    SecurityScheme::Http {
        scheme: scheme.to_string(),
        bearer_format: bearer_format.map(str::to_string),
        description: None,
        extensions: Default::default(),
    }
}

/// JWT, Bearer and Basic security schemes.
pub fn security_schemes(api: TransformOpenApi<'_>) -> TransformOpenApi<'_> {
    api.security_scheme("JWT", http_scheme("bearer", Some("JWT")))
        .security_scheme("Bearer", http_scheme("bearer", None))
        .security_scheme("Basic", http_scheme("basic", None))
}

/// Origin of the request as seen by the client.
pub fn request_origin(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("X-Forwarded-Proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}

/// Copy of `api` whose only server is the caller's origin.
pub fn with_request_server(api: &OpenApi, headers: &HeaderMap) -> OpenApi {
    let mut doc = api.clone();
    doc.servers = vec![Server {
        url: request_origin(headers),
        description: Some("Current environment".to_string()),
        ..Server::default()
    }];
    doc
}

/// Route serving the finished document.
pub fn doc_route<S>(api: OpenApi) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let api = Arc::new(api);
    get(move |headers: HeaderMap| {
        let api = api.clone();
        async move { Json(with_request_server(&api, &headers)) }
    })
}

/// Swagger UI page loading the document from `spec_url`.
pub fn swagger_route<S>(spec_url: &'static str, title: &'static str) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(Swagger::new(spec_url).with_title(title).axum_handler())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_origin() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_origin(&headers), "http://localhost");

        headers.insert(header::HOST, "example.com:8787".parse().unwrap());
        headers.insert("X-Forwarded-Proto", "https".parse().unwrap());
        assert_eq!(request_origin(&headers), "https://example.com:8787");
    }

    #[test]
    fn test_servers_follow_the_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "lab.example.com".parse().unwrap());

        let doc = with_request_server(&base_document(), &headers);
        assert_eq!(doc.servers.len(), 1);
        assert_eq!(doc.servers[0].url, "http://lab.example.com");
        assert_eq!(doc.servers[0].description.as_deref(), Some("Current environment"));
        assert_eq!(doc.info.title, DOC_TITLE);
    }
}
