//! In-memory todo store implementation for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Todo, TodoStore, TodoStoreResult};

/// In-memory todo store for testing purposes.
///
/// Applies the same visibility rules as the PostgreSQL store: soft-deleted
/// records stay in the map but are excluded from every read.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    todos: RwLock<HashMap<i64, Todo>>,
    next_id: AtomicI64,
}

impl MemoryTodoStore {
    /// Creates a new in-memory todo store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create_todo(&self, content: &str) -> TodoStoreResult<Todo> {
        let now = Utc::now();
        let todo = Todo {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let mut todos = self.todos.write().await;
        todos.insert(todo.id, todo.clone());

        Ok(todo)
    }

    async fn get_todo(&self, id: i64) -> TodoStoreResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.get(&id).filter(|t| !t.is_deleted()).cloned())
    }

    async fn list_todos(&self) -> TodoStoreResult<(Vec<Todo>, i64)> {
        // One lock acquisition covers both the items and the count, so
        // they come from the same snapshot.
        let todos = self.todos.read().await;
        let mut items: Vec<Todo> = todos
            .values()
            .filter(|t| !t.is_deleted())
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let count = items.len() as i64;
        Ok((items, count))
    }

    async fn update_todo(&self, id: i64, content: &str) -> TodoStoreResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&id).filter(|t| !t.is_deleted()) {
            Some(todo) => {
                todo.content = content.to_string();
                todo.updated_at = Utc::now();
                Ok(Some(todo.clone()))
            }
            None => Ok(None),
        }
    }

    async fn soft_delete_todo(&self, id: i64) -> TodoStoreResult<bool> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&id).filter(|t| !t.is_deleted()) {
            Some(todo) => {
                let now = Utc::now();
                todo.deleted_at = Some(now);
                todo.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
