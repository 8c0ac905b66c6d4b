//! Todo store trait definition.

use async_trait::async_trait;

use crate::{Todo, TodoStoreResult};

/// Trait for todo storage operations.
///
/// Implementations are the sole writers of todo records and enforce the
/// lifecycle rules: server-assigned timestamps, `updated_at` refreshed on
/// every mutation, and soft-deleted records excluded from all reads. Each
/// operation is one transactional unit; no transaction spans calls.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Creates a new todo with the given content.
    ///
    /// Assigns the id and sets `created_at == updated_at` to the current
    /// time. Returns the persisted record including generated fields.
    async fn create_todo(&self, content: &str) -> TodoStoreResult<Todo>;

    /// Gets an active todo by id.
    ///
    /// Returns `None` when no active record matches; a never-created id
    /// and a soft-deleted one are indistinguishable to the caller.
    async fn get_todo(&self, id: i64) -> TodoStoreResult<Option<Todo>>;

    /// Lists all active todos, most recently created first, together with
    /// the active-record count.
    ///
    /// Both reads come from the same snapshot, so the count always equals
    /// the number of returned items.
    async fn list_todos(&self) -> TodoStoreResult<(Vec<Todo>, i64)>;

    /// Updates an active todo's content, refreshing `updated_at`.
    ///
    /// Returns the refreshed record, or `None` when no active record
    /// matches. Soft-deleted records cannot be updated.
    async fn update_todo(&self, id: i64, content: &str) -> TodoStoreResult<Option<Todo>>;

    /// Soft-deletes an active todo by setting `deleted_at`, refreshing
    /// `updated_at` to the same instant.
    ///
    /// Returns `false` when no active record matches. A second call for
    /// the same id returns `false`: the first delete removed it from the
    /// active set. The record itself remains in storage.
    async fn soft_delete_todo(&self, id: i64) -> TodoStoreResult<bool>;
}
