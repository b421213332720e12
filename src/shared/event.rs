//! List snapshot event
//!
//! The realtime channel does not ship diffs: every successful mutation
//! broadcasts the full current list, newest first, and subscribers
//! replace their whole view with it. Missed intermediate snapshots are
//! therefore harmless.

use crate::shared::todo::Todo;

/// One broadcast event: the complete list at some point in time,
/// sorted newest-first.
pub type TodoListSnapshot = Vec<Todo>;
