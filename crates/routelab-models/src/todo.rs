//! Todo records for the pages app.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A submitted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Todo {
    pub id: String,
    pub title: String,
}

impl Todo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Full list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Acknowledgement returned after a todo is stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Created {
    pub message: String,
}

impl Created {
    pub fn new() -> Self {
        Self {
            message: "created!".to_string(),
        }
    }
}

impl Default for Created {
    fn default() -> Self {
        Self::new()
    }
}
