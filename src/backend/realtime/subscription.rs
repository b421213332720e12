/**
 * Snapshot Subscription Handler
 *
 * Implements the Server-Sent Events subscription for
 * `GET /api/todos/subscribe`. SSE gives us the one-way server-to-client
 * stream the realtime frontend needs without WebSocket machinery.
 *
 * # Stream contents
 *
 * The stream opens with one `snapshot` event holding the current list,
 * then emits a `snapshot` event for every subsequent broadcast. A lagged
 * subscriber skips straight to the freshest snapshot; since every event
 * carries the whole list, nothing is lost.
 */

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream, StreamExt};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::event::TodoListSnapshot;

fn snapshot_event(snapshot: &TodoListSnapshot) -> Result<Event, axum::Error> {
    Event::default().event("snapshot").json_data(snapshot)
}

/// Handle snapshot subscription (GET /api/todos/subscribe)
///
/// Sends the current list immediately, then one event per mutation.
///
/// # Errors
///
/// * `503 Service Unavailable` - store not configured or unreachable
///   while loading the initial snapshot
pub async fn handle_snapshot_subscription(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    tracing::debug!("[Realtime] Snapshot subscription request received");

    let store = state.require_store()?;
    let initial = store.list().await?;

    let rx = state.snapshot_broadcast.subscribe();
    let updates = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(snapshot) => Some(snapshot_event(&snapshot)),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                // The next snapshot carries the full list anyway
                tracing::debug!("[Realtime] Subscriber lagged, skipped {} snapshots", skipped);
                None
            }
        }
    });

    let stream = stream::once(async move { snapshot_event(&initial) }).chain(updates);

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
