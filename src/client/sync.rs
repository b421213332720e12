/**
 * Realtime Sync Client
 *
 * The frontend state machine. Two kinds of triggers drive it: local
 * user actions (add/edit/delete) and remote snapshot notifications.
 *
 * The visible list is deliberately NOT updated by local actions: a
 * mutation request goes out, and the UI repaints only when the
 * store-confirmed snapshot arrives through the subscription. Request
 * failures are folded into a user-facing alert queue and never retried
 * automatically.
 *
 * A cancelled edit prompt or input that trims to empty issues no
 * request at all; a delete goes out only when the user confirmed it.
 */

use chrono::Utc;
use uuid::Uuid;

use crate::client::cache::CacheMirror;
use crate::client::rest::TodoApiClient;
use crate::shared::event::TodoListSnapshot;
use crate::shared::todo::{normalize_text, sort_newest_first, CreateTodoRequest, Todo, UpdateTodoRequest};

/// Client-side list state, driven by the subscription
pub struct SyncClient {
    api: TodoApiClient,
    cache: CacheMirror,
    todos: Vec<Todo>,
    alerts: Vec<String>,
}

impl SyncClient {
    /// Create a sync client with the default cache location
    pub fn new(api: TodoApiClient) -> Self {
        Self::with_cache(api, CacheMirror::new())
    }

    /// Create a sync client with an explicit cache mirror
    pub fn with_cache(api: TodoApiClient, cache: CacheMirror) -> Self {
        Self {
            api,
            cache,
            todos: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// The visible list, newest first
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Pending user-facing alerts, oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drain the alert queue (the UI shows and clears them)
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Paint the last cached snapshot before the subscription delivers
    pub fn load_cached(&mut self) {
        self.todos = self.cache.load();
        sort_newest_first(&mut self.todos);
    }

    /// Local add action
    ///
    /// Trims the input; empty input is silently ignored. The create
    /// request carries the client-observed creation time. The visible
    /// list is not touched; the remote snapshot repaints it.
    pub async fn add(&mut self, input: &str) {
        let Some(text) = normalize_text(input) else {
            return;
        };

        let request = CreateTodoRequest {
            text,
            created_at: Some(Utc::now()),
            ..CreateTodoRequest::default()
        };

        if let Err(e) = self.api.create(request).await {
            self.alerts.push(format!("Failed to add todo: {}", e));
        }
    }

    /// Local edit action
    ///
    /// `new_text` is the prompt outcome: `None` means the user
    /// cancelled. Cancelled or trimmed-empty input issues no request;
    /// otherwise only the text field is updated.
    pub async fn edit(&mut self, id: Uuid, new_text: Option<&str>) {
        let Some(input) = new_text else {
            return; // cancelled
        };
        let Some(text) = normalize_text(input) else {
            return;
        };

        if let Err(e) = self.api.update(id, UpdateTodoRequest::text_only(text)).await {
            self.alerts.push(format!("Failed to update todo: {}", e));
        }
    }

    /// Local delete action
    ///
    /// Issues the request only when the user confirmed the deletion.
    pub async fn delete(&mut self, id: Uuid, confirmed: bool) {
        if !confirmed {
            return;
        }

        if let Err(e) = self.api.delete(id).await {
            self.alerts.push(format!("Failed to delete todo: {}", e));
        }
    }

    /// Remote snapshot notification
    ///
    /// Re-sorts newest-first, replaces the entire visible list, and
    /// persists the snapshot to the cache mirror. This is the only path
    /// that mutates the visible list after the initial cached paint.
    pub fn apply_remote(&mut self, mut snapshot: TodoListSnapshot) {
        sort_newest_first(&mut snapshot);
        self.todos = snapshot;

        if let Err(e) = self.cache.store(&self.todos) {
            tracing::warn!("Failed to write cache mirror: {}", e);
        }
    }
}
