/**
 * Todo Record Data Structures
 *
 * This module defines the Todo record and the request shapes used for
 * creating and updating records. The types are shared between the server
 * (for storage and snapshot broadcasts) and the client (for display and
 * the cache mirror), serialized to/from JSON with the camelCase field
 * names the API exposes.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority
///
/// Serialized as a lowercase string (`"low"`, `"medium"`, `"high"`),
/// which is also how it is stored in the `todos` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal priority
    Medium,
    /// Needs attention first
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Represents a single todo record
///
/// This structure is used both on the server (for storage and snapshot
/// broadcasts) and on the client (for the visible list and the cache
/// mirror).
///
/// # Invariants
///
/// * `text` is stored trimmed and is never empty
/// * `id` is unique and never reused
/// * `updated_at >= created_at` always
///
/// # Example
/// ```rust
/// use todosync::shared::todo::Todo;
///
/// let todo = Todo::new("buy milk".to_string());
/// assert_eq!(todo.text, "buy milk");
/// assert!(!todo.completed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-assigned identifier, immutable after creation
    pub id: Uuid,
    /// The task description, trimmed, never empty
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
    /// Task priority
    pub priority: Priority,
    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful modification
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new record with a fresh id and the current timestamp
    ///
    /// The caller is responsible for passing already-trimmed, non-empty
    /// text; handlers validate input before constructing records.
    pub fn new(text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            priority: Priority::default(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /api/todos`
///
/// Only `text` is required. The realtime client sends its observed
/// creation time in `created_at`; the server clamps it to its own clock
/// so `updated_at >= created_at` cannot be violated by clock skew.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    /// The task description; must be non-empty after trimming
    pub text: String,
    /// Initial completion flag, defaults to false
    #[serde(default)]
    pub completed: bool,
    /// Initial priority, defaults to medium
    #[serde(default)]
    pub priority: Priority,
    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Client-observed creation time (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateTodoRequest {
    /// Convenience constructor for a text-only create
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Body of `PUT /api/todos/{id}`
///
/// Partial replacement: omitted fields are left untouched. Supplying
/// `text` that trims to empty is a validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTodoRequest {
    /// A patch that changes only the task text
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// True when the patch carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// Body of the `DELETE /api/todos/{id}` response
///
/// Deletion confirms with a message and echoes the removed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTodoResponse {
    pub message: String,
    pub todo: Todo,
}

/// Trim task text, rejecting whitespace-only input
///
/// Returns the trimmed text, or `None` when nothing remains. This is the
/// single validation rule for the `text` field; both the handlers and
/// the sync client go through it.
pub fn normalize_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Sort records newest-first by creation time
///
/// Ties (identical `created_at`) break on id so the order is stable
/// across re-sorts.
pub fn sort_newest_first(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
