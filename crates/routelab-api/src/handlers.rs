//! Request handlers.

pub mod auth_demo;
pub mod books;
pub mod formats;
pub mod health;
pub mod posts;
pub mod todos;
pub mod tools;
pub mod users;

pub use auth_demo::*;
pub use books::*;
pub use formats::*;
pub use health::*;
pub use posts::*;
pub use todos::*;
pub use tools::*;
pub use users::*;
