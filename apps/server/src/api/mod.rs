//! API endpoints.

pub mod todo;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use todo_store::TodoStore;

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: TodoStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Todo collection endpoints
        .route(
            "/api/v1/todo",
            get(todo::list_todos).post(todo::create_todo),
        )
        // Todo member endpoints
        .route(
            "/api/v1/todo/:id",
            get(todo::retrieve_todo)
                .put(todo::update_todo)
                .delete(todo::delete_todo),
        )
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
