//! Shared data models for the RouteLab demo apps.
//!
//! This crate provides Serde-serializable types for:
//! - Todo records kept by the pages app
//! - Users, login and JWT claims for the OpenAPI app
//! - RPC request/response pairs shared by server and client
//! - The JSON error body returned on validation and auth failures

pub mod auth;
pub mod book;
pub mod error;
pub mod message;
pub mod rpc;
pub mod todo;
pub mod user;

// Re-export common types
pub use auth::{Claims, LoginRequest, LoginResponse};
pub use book::{Book, BookRequest};
pub use error::{ErrorBody, FieldErrors};
pub use message::{ApiInfo, Message};
pub use rpc::{Greeting, GreetingQuery};
pub use todo::{Created, Todo, TodoList};
pub use user::{User, UserPath};
