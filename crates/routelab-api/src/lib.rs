//! Axum demo apps.
//!
//! This crate provides:
//! - A JSON/text/HTML main app with a posts stub
//! - A WebSocket echo server
//! - A typed RPC server and its client
//! - A todo list mounted under `/api`
//! - Documented routes with JWT, bearer and basic auth, an OpenAPI 3.1
//!   document and Swagger UI

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod rpc;
pub mod state;
pub mod ws;

pub use config::{ApiConfig, AppKind};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use rpc::{RpcClient, RpcError};
pub use state::{AppState, TodoStore};
