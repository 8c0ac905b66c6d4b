//! Entity types for the todo store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Store-assigned identifier, immutable once created
    pub id: i64,
    /// Todo text
    pub content: String,
    /// Created timestamp, set once by the store
    pub created_at: DateTime<Utc>,
    /// Updated timestamp, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; `None` means the record is active
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Returns true if the record has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
