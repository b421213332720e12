//! Todo HTTP Handlers
//!
//! The five CRUD operations over the `todos` collection. Each handler
//! validates its input, runs a single store call, and maps the outcome
//! to a status code per the error taxonomy in `backend::error`. Every
//! successful mutation re-reads the list and broadcasts it on the
//! snapshot channel.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::realtime::broadcast::broadcast_snapshot;
use crate::backend::server::state::AppState;
use crate::backend::store::{NewTodo, TodoPatch, TodoStore};
use crate::shared::todo::{
    normalize_text, CreateTodoRequest, DeleteTodoResponse, Todo, UpdateTodoRequest,
};

/// Parse an id path parameter, mapping format failures to 400
fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::invalid_id(id))
}

/// Re-read the list and publish it to subscribers
///
/// A failed re-read only costs subscribers one snapshot; the mutation
/// itself already succeeded, so the request is not failed over it.
async fn publish_snapshot(state: &AppState, store: &Arc<dyn TodoStore>) {
    match store.list().await {
        Ok(todos) => {
            broadcast_snapshot(&state.snapshot_broadcast, todos);
        }
        Err(e) => {
            tracing::warn!("Failed to load list for snapshot broadcast: {}", e);
        }
    }
}

/// List all todos (GET /api/todos)
///
/// Returns every record, newest first. No pagination, no filtering.
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let store = state.require_store()?;
    let todos = store.list().await?;
    Ok(Json(todos))
}

/// Get one todo by id (GET /api/todos/{id})
///
/// # Errors
///
/// * `400` - id is not a valid UUID
/// * `404` - no record with this id
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let store = state.require_store()?;
    let id = parse_id(&id)?;

    let todo = store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    Ok(Json(todo))
}

/// Create a todo (POST /api/todos)
///
/// Rejects text that is empty after trimming. A client-observed
/// `createdAt` is honored but clamped to the server clock so
/// `updatedAt >= createdAt` always holds.
///
/// # Errors
///
/// * `400` - text empty after trimming
pub async fn create_todo(
    State(state): State<AppState>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let store = state.require_store()?;

    let text = normalize_text(&request.text)
        .ok_or_else(|| ApiError::validation("text", "Todo text cannot be empty"))?;

    let now = Utc::now();
    let created_at = request.created_at.map(|t| t.min(now)).unwrap_or(now);

    let todo = store
        .create(NewTodo {
            text,
            completed: request.completed,
            priority: request.priority,
            due_date: request.due_date,
            created_at,
        })
        .await?;

    tracing::info!("Created todo {}", todo.id);
    publish_snapshot(&state, &store).await;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Update a todo (PUT /api/todos/{id})
///
/// Partial or full field replacement; omitted fields are untouched and
/// `updatedAt` is refreshed.
///
/// # Errors
///
/// * `400` - id malformed, or supplied text empty after trimming
/// * `404` - no record with this id
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let store = state.require_store()?;
    let id = parse_id(&id)?;

    let text = match request.text {
        Some(text) => Some(
            normalize_text(&text)
                .ok_or_else(|| ApiError::validation("text", "Todo text cannot be empty"))?,
        ),
        None => None,
    };

    let patch = TodoPatch {
        text,
        completed: request.completed,
        priority: request.priority,
        due_date: request.due_date,
    };

    let todo = store
        .update(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    tracing::info!("Updated todo {}", todo.id);
    publish_snapshot(&state, &store).await;

    Ok(Json(todo))
}

/// Delete a todo (DELETE /api/todos/{id})
///
/// # Errors
///
/// * `400` - id is not a valid UUID
/// * `404` - no record with this id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTodoResponse>, ApiError> {
    let store = state.require_store()?;
    let id = parse_id(&id)?;

    let todo = store
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    tracing::info!("Deleted todo {}", todo.id);
    publish_snapshot(&state, &store).await;

    Ok(Json(DeleteTodoResponse {
        message: "Todo deleted".to_string(),
        todo,
    }))
}
