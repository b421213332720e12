/**
 * Snapshot Broadcasting
 *
 * Broadcasts list snapshots to all subscribers using
 * `tokio::sync::broadcast`, a multi-producer, multi-consumer channel.
 * All subscribers receive a copy of each snapshot.
 *
 * Having no subscribers is the normal case (nobody watching), not an
 * error: the send result is only used for logging.
 */

use tokio::sync::broadcast;

use crate::shared::event::TodoListSnapshot;

/// Broadcast channel for list snapshots
///
/// Cloned into the application state and shared across handlers so any
/// mutation can publish from wherever it runs.
pub type TodoSnapshotBroadcast = broadcast::Sender<TodoListSnapshot>;

/// Broadcast a snapshot to all subscribers
///
/// Returns the number of active subscribers that received the snapshot
/// (0 if nobody is listening).
pub fn broadcast_snapshot(
    broadcast_tx: &TodoSnapshotBroadcast,
    snapshot: TodoListSnapshot,
) -> usize {
    match broadcast_tx.send(snapshot) {
        Ok(subscriber_count) => {
            tracing::debug!(
                "[Realtime] Snapshot broadcast to {} subscribers",
                subscriber_count
            );
            subscriber_count
        }
        Err(_) => {
            // No subscribers
            tracing::trace!("[Realtime] No subscribers to receive snapshot");
            0
        }
    }
}
