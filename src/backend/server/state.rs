/**
 * Application State Management
 *
 * This module defines the application state structure and the `FromRef`
 * implementations for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - The injected store handle (`None` when no store is configured)
 * - The snapshot broadcast channel for real-time updates
 *
 * The store is carried as `Arc<dyn TodoStore>` rather than a concrete
 * pool so the handler set stays independently testable with a
 * substitutable store; the connection lifecycle lives behind the trait.
 *
 * # Thread Safety
 *
 * All fields are cheap to clone and safe for concurrent access:
 * `Arc<dyn TodoStore>` is shared, `broadcast::Sender` can be cloned into
 * any handler.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::broadcast;

use crate::backend::error::ApiError;
use crate::backend::realtime::broadcast::TodoSnapshotBroadcast;
use crate::backend::store::TodoStore;
use crate::shared::event::TodoListSnapshot;

/// Capacity of the snapshot broadcast channel
///
/// Snapshots supersede each other, so a small buffer is enough; lagged
/// subscribers just pick up the next one.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// The injected store
    ///
    /// `None` when no connection string is configured; store-backed
    /// endpoints then respond with 503.
    pub store: Option<Arc<dyn TodoStore>>,

    /// Broadcast channel publishing a full list snapshot per mutation
    pub snapshot_broadcast: TodoSnapshotBroadcast,
}

impl AppState {
    /// Create state around an optional store
    pub fn new(store: Option<Arc<dyn TodoStore>>) -> Self {
        let (snapshot_broadcast, _) =
            broadcast::channel::<TodoListSnapshot>(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            store,
            snapshot_broadcast,
        }
    }

    /// Create state with a configured store (the common test entry)
    pub fn with_store(store: Arc<dyn TodoStore>) -> Self {
        Self::new(Some(store))
    }

    /// The store, or the 503 error the handlers surface without one
    pub fn require_store(&self) -> Result<Arc<dyn TodoStore>, ApiError> {
        self.store.clone().ok_or_else(|| {
            ApiError::unavailable(
                "Store is not configured. Set DATABASE_URL to enable persistence",
            )
        })
    }
}

/// Allow handlers to extract just the store
impl FromRef<AppState> for Option<Arc<dyn TodoStore>> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Allow handlers to extract just the broadcast sender
impl FromRef<AppState> for TodoSnapshotBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.snapshot_broadcast.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::MemoryTodoStore;

    #[tokio::test]
    async fn test_require_store_without_store() {
        let state = AppState::new(None);
        let error = state.require_store().unwrap_err();
        assert_eq!(
            error.status_code(),
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_require_store_with_store() {
        let state = AppState::with_store(Arc::new(MemoryTodoStore::new()));
        assert!(state.require_store().is_ok());
    }
}
