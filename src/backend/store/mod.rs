//! Store Module
//!
//! This module owns everything between the HTTP handlers and PostgreSQL:
//! the connection manager, the store abstraction the handlers are written
//! against, and its two implementations.
//!
//! # Architecture
//!
//! - **`connect`** - Connection manager (`StoreHandle`) with explicit
//!   state transitions, startup retry, and categorized failure logging
//! - **`pg`** - sqlx-backed `TodoStore` over a `StoreHandle`
//! - **`memory`** - in-memory `TodoStore` with identical semantics
//!
//! # The store seam
//!
//! Handlers never hold a pool. They receive an injected
//! `Arc<dyn TodoStore>`, which keeps them testable with a substitutable
//! store and keeps the process-wide connection state owned by exactly one
//! place (`StoreHandle`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::todo::{Priority, Todo};

/// Connection manager
pub mod connect;

/// PostgreSQL-backed store
pub mod pg;

/// In-memory store
pub mod memory;

pub use connect::{ConnectionState, ErrorCategory, StoreHandle};
pub use memory::MemoryTodoStore;
pub use pg::PgTodoStore;

/// Store-level errors
///
/// `Unavailable` means the connection could not be ensured (unreachable
/// store or a timed-out attempt); everything else the driver reports is
/// `Query`. The API layer maps these to 503 and 500 respectively.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store is unreachable or the connection attempt timed out
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Human-readable description of the connectivity failure
        message: String,
    },

    /// Any other driver error
    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

impl StoreError {
    /// Create a new unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// A validated record ready for insertion
///
/// Handlers build this after validating input: `text` is trimmed and
/// non-empty, `created_at` is already clamped to the server clock.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A validated partial update
///
/// `None` fields are left untouched. If `text` is present it is trimmed
/// and non-empty.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// The data-access seam the CRUD handlers are written against
///
/// Both implementations uphold the record invariants: ids are assigned
/// once, `text` is stored as given (pre-validated), `updated_at` is
/// refreshed on every successful modification, and `list` returns
/// records newest-first.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records, sorted by creation time descending
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// One record by id, or `None` if absent
    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;

    /// Persist a new record, assigning its id and `updated_at`
    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError>;

    /// Apply a partial update; `None` means the id does not exist
    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;

    /// Remove a record, returning it; `None` means the id does not exist
    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;
}

impl std::fmt::Debug for dyn TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn TodoStore")
    }
}
