//! Todo API endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_store::{Todo, TodoStore};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Request body for creating a todo.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub content: String,
}

/// Request body for updating a todo.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub content: String,
}

/// A single todo in a response. The soft-delete marker is internal and
/// never serialized.
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response body for listing todos.
#[derive(Debug, Serialize)]
pub struct ListTodosResponse {
    pub count: i64,
    pub items: Vec<TodoResponse>,
}

/// Converts a store todo to its response shape.
fn to_response(todo: &Todo) -> TodoResponse {
    TodoResponse {
        id: todo.id,
        content: todo.content.clone(),
        created_at: todo.created_at,
        updated_at: todo.updated_at,
    }
}

fn not_found() -> ServerError {
    ServerError::NotFound("Todo not found".to_string())
}

/// Creates a new todo.
pub async fn create_todo<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateTodoRequest>,
) -> ServerResult<Json<TodoResponse>> {
    let todo = state.store.create_todo(&request.content).await?;

    tracing::info!(id = todo.id, "Todo created");

    Ok(Json(to_response(&todo)))
}

/// Retrieves a todo by id.
pub async fn retrieve_todo<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> ServerResult<Json<TodoResponse>> {
    let todo = state.store.get_todo(id).await?.ok_or_else(not_found)?;

    Ok(Json(to_response(&todo)))
}

/// Lists all todos, most recently created first.
pub async fn list_todos<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<ListTodosResponse>> {
    let (items, count) = state.store.list_todos().await?;

    Ok(Json(ListTodosResponse {
        count,
        items: items.iter().map(to_response).collect(),
    }))
}

/// Updates a todo's content.
pub async fn update_todo<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTodoRequest>,
) -> ServerResult<Json<TodoResponse>> {
    let todo = state
        .store
        .update_todo(id, &request.content)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(id = todo.id, "Todo updated");

    Ok(Json(to_response(&todo)))
}

/// Soft-deletes a todo.
pub async fn delete_todo<S: TodoStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    if !state.store.soft_delete_todo(id).await? {
        return Err(not_found());
    }

    tracing::info!(id, "Todo soft-deleted");

    Ok(StatusCode::NO_CONTENT)
}
