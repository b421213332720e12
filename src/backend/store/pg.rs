//! PostgreSQL-backed store
//!
//! Query functions over the `todos` table plus the `TodoStore`
//! implementation that runs them. Every operation ensures a live
//! connection first, so a store that went away comes back lazily on the
//! next request.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::backend::store::connect::StoreHandle;
use crate::backend::store::{NewTodo, StoreError, TodoPatch, TodoStore};
use crate::shared::todo::{Priority, Todo};

fn row_to_todo(row: PgRow) -> Todo {
    Todo {
        id: row.get("id"),
        text: row.get("text"),
        completed: row.get("completed"),
        priority: Priority::from_str(row.get::<String, _>("priority").as_str())
            .unwrap_or_default(),
        due_date: row.get("due_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// All records, newest first
pub async fn list_todos(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, text, completed, priority, due_date, created_at, updated_at
        FROM todos
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_todo).collect())
}

/// One record by id
pub async fn get_todo(pool: &PgPool, id: Uuid) -> Result<Option<Todo>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, text, completed, priority, due_date, created_at, updated_at
        FROM todos
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_todo))
}

/// Insert a validated record, assigning id and `updated_at`
pub async fn insert_todo(pool: &PgPool, new: &NewTodo) -> Result<Todo, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO todos (id, text, completed, priority, due_date, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(&new.text)
    .bind(new.completed)
    .bind(new.priority.as_str())
    .bind(new.due_date)
    .bind(new.created_at)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Todo {
        id,
        text: new.text.clone(),
        completed: new.completed,
        priority: new.priority,
        due_date: new.due_date,
        created_at: new.created_at,
        updated_at: now,
    })
}

/// Apply a partial update, refreshing `updated_at`
///
/// Returns the updated record, or `None` when the id does not exist.
pub async fn update_todo(
    pool: &PgPool,
    id: Uuid,
    patch: &TodoPatch,
) -> Result<Option<Todo>, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query(
        r#"
        UPDATE todos
        SET text = COALESCE($2, text),
            completed = COALESCE($3, completed),
            priority = COALESCE($4, priority),
            due_date = COALESCE($5, due_date),
            updated_at = $6
        WHERE id = $1
        RETURNING id, text, completed, priority, due_date, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(patch.text.as_deref())
    .bind(patch.completed)
    .bind(patch.priority.map(|p| p.as_str()))
    .bind(patch.due_date)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_todo))
}

/// Remove a record, returning it
pub async fn delete_todo(pool: &PgPool, id: Uuid) -> Result<Option<Todo>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        DELETE FROM todos
        WHERE id = $1
        RETURNING id, text, completed, priority, due_date, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_todo))
}

/// `TodoStore` over a managed PostgreSQL connection
///
/// Holds a [`StoreHandle`] rather than a pool: each operation calls
/// `ensure_connection()` first, so requests either run against a live
/// connection or fail with `StoreError::Unavailable`.
#[derive(Clone)]
pub struct PgTodoStore {
    handle: StoreHandle,
}

impl PgTodoStore {
    pub fn new(handle: StoreHandle) -> Self {
        Self { handle }
    }

    /// The underlying connection handle (for shutdown and diagnostics)
    pub fn handle(&self) -> &StoreHandle {
        &self.handle
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let pool = self.handle.ensure_connection().await?;
        Ok(list_todos(&pool).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let pool = self.handle.ensure_connection().await?;
        Ok(get_todo(&pool, id).await?)
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let pool = self.handle.ensure_connection().await?;
        Ok(insert_todo(&pool, &new).await?)
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let pool = self.handle.ensure_connection().await?;
        Ok(update_todo(&pool, id, &patch).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let pool = self.handle.ensure_connection().await?;
        Ok(delete_todo(&pool, id).await?)
    }
}
