//! Todo list handlers for the pages app.

use axum::extract::State;
use axum::Json;
use routelab_models::{Created, Todo, TodoList};
use tracing::info;

use crate::extract::ValidatedForm;
use crate::metrics;
use crate::state::AppState;

/// Append a form-submitted todo.
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedForm(todo): ValidatedForm<Todo>,
) -> Json<Created> {
    let id = todo.id.clone();
    let count = state.todos.push(todo).await;
    metrics::record_todo_created();
    info!(id = %id, count, "Todo created");
    Json(Created::new())
}

/// Every stored todo in insertion order.
pub async fn list_todos(State(state): State<AppState>) -> Json<TodoList> {
    Json(TodoList {
        todos: state.todos.all().await,
    })
}
