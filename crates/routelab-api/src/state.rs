//! Application state.

use std::sync::Arc;

use routelab_models::Todo;
use tokio::sync::RwLock;

use crate::config::ApiConfig;

/// Append-only, process-lifetime todo list.
#[derive(Clone, Default)]
pub struct TodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return the new length.
    pub async fn push(&self, todo: Todo) -> usize {
        let mut todos = self.todos.write().await;
        todos.push(todo);
        todos.len()
    }

    /// Snapshot of every record in insertion order.
    pub async fn all(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub todos: TodoStore,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            todos: TodoStore::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_keeps_insertion_order() {
        let store = TodoStore::new();
        assert_eq!(store.push(Todo::new("1", "first")).await, 1);
        assert_eq!(store.push(Todo::new("2", "second")).await, 2);

        let ids: Vec<_> = store.all().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let state = AppState::default();
        let clone = state.clone();
        clone.todos.push(Todo::new("1", "shared")).await;
        assert_eq!(state.todos.all().await.len(), 1);
    }
}
