//! Real-time Update Module
//!
//! Every successful mutation broadcasts the full current list to all
//! subscribers; the subscription endpoint streams those snapshots over
//! Server-Sent Events. Because each event carries the whole list, a
//! subscriber that misses events just picks up the next snapshot.
//!
//! # Module Structure
//!
//! - **`broadcast`** - snapshot broadcasting utilities
//! - **`subscription`** - SSE subscription handler

/// Snapshot broadcasting utilities
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{broadcast_snapshot, TodoSnapshotBroadcast};
pub use subscription::handle_snapshot_subscription;
