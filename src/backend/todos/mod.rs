//! Todo Backend Module
//!
//! The CRUD handler set for the `todos` collection. Handlers are written
//! against the injected `TodoStore` seam and never touch the connection
//! themselves.

/// HTTP handlers for the CRUD operations
pub mod handlers;

// Re-export commonly used handlers
pub use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};
