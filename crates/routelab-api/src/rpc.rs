//! Typed RPC pair.
//!
//! The server route and [`RpcClient`] share the request and response types
//! from `routelab-models`, so a change to either side fails to compile on
//! the other.

use std::time::Duration;

use axum::Json;
use reqwest::Client;
use routelab_models::{ErrorBody, Greeting, GreetingQuery};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::extract::ValidatedQuery;

/// Path of the greeting route.
pub const TEST_PATH: &str = "/test";

/// `GET /test?name=<name>`.
pub async fn greet(ValidatedQuery(query): ValidatedQuery<GreetingQuery>) -> Json<Greeting> {
    Json(Greeting::for_name(&query.name))
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body:?}")]
    Api { status: u16, body: ErrorBody },
}

/// Client for the RPC server.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    base: Url,
}

impl RpcClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, RpcError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Call `GET /test`.
    pub async fn test(&self, query: &GreetingQuery) -> Result<Greeting, RpcError> {
        let url = self.base.join(TEST_PATH)?;
        debug!(url = %url, "Calling RPC route");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json::<Greeting>().await?)
        } else {
            let body = response.json::<ErrorBody>().await?;
            Err(RpcError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
