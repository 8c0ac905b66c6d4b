//! Todo storage and lifecycle management
//!
//! This crate owns the persisted representation of todo records and their
//! lifecycle rules: creation, content updates, and soft deletion via a
//! nullable `deleted_at` timestamp. Reads never surface soft-deleted
//! records. PostgreSQL is the production backend; an in-memory store is
//! provided for tests.

mod entities;
mod error;
mod memory;
mod postgres;
mod traits;

pub use entities::*;
pub use error::*;
pub use memory::*;
pub use postgres::*;
pub use traits::*;
