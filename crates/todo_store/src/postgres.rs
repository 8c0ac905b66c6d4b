//! PostgreSQL todo store implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::{Todo, TodoStore, TodoStoreError, TodoStoreResult};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS todo (
    id BIGSERIAL PRIMARY KEY,
    content TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    deleted_at TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS ix_todo_active_created_at
    ON todo (created_at DESC) WHERE deleted_at IS NULL;
";

/// PostgreSQL-backed todo store.
///
/// Every mutating operation runs inside its own transaction; an error
/// before commit rolls the transaction back when it is dropped.
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    /// Connects to PostgreSQL and bootstraps the schema.
    pub async fn connect(options: PgConnectOptions) -> TodoStoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Creates a store from an existing pool, bootstrapping the schema.
    pub async fn from_pool(pool: PgPool) -> TodoStoreResult<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn run_migrations(&self) -> TodoStoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| TodoStoreError::Migration(e.to_string()))?;

        tracing::debug!("Todo schema ensured");

        Ok(())
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn create_todo(&self, content: &str) -> TodoStoreResult<Todo> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let todo: Todo = sqlx::query_as(
            "INSERT INTO todo (content, created_at, updated_at) \
             VALUES ($1, $2, $2) \
             RETURNING id, content, created_at, updated_at, deleted_at",
        )
        .bind(content)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(todo)
    }

    async fn get_todo(&self, id: i64) -> TodoStoreResult<Option<Todo>> {
        let todo: Option<Todo> = sqlx::query_as(
            "SELECT id, content, created_at, updated_at, deleted_at \
             FROM todo \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn list_todos(&self) -> TodoStoreResult<(Vec<Todo>, i64)> {
        // Count and items are separate queries; a repeatable-read
        // transaction pins both to one snapshot so they cannot disagree
        // under concurrent writes.
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM todo WHERE deleted_at IS NULL")
            .fetch_one(&mut *tx)
            .await?;

        let items: Vec<Todo> = sqlx::query_as(
            "SELECT id, content, created_at, updated_at, deleted_at \
             FROM todo \
             WHERE deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((items, count))
    }

    async fn update_todo(&self, id: i64, content: &str) -> TodoStoreResult<Option<Todo>> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        // Single-statement read-modify-write: the active-record filter and
        // the mutation are atomic, so a soft-deleted row is never touched.
        let todo: Option<Todo> = sqlx::query_as(
            "UPDATE todo SET content = $2, updated_at = $3 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING id, content, created_at, updated_at, deleted_at",
        )
        .bind(id)
        .bind(content)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(todo)
    }

    async fn soft_delete_todo(&self, id: i64) -> TodoStoreResult<bool> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE todo SET deleted_at = $2, updated_at = $2 \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
