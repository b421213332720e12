//! Backend Module
//!
//! This module contains all server-side code for the todosync service:
//! an Axum HTTP server exposing the todo CRUD API, the store layer with
//! its connection manager, and the realtime snapshot channel.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`todos`** - the CRUD handler set
//! - **`store`** - store abstraction, connection manager, implementations
//! - **`realtime`** - snapshot broadcasting and the SSE subscription
//! - **`error`** - API error taxonomy and response conversion
//!
//! # State Management
//!
//! `AppState` holds the injected store (`Arc<dyn TodoStore>`) and the
//! snapshot broadcast channel. The connection handle owns all
//! connection-state transitions; handlers stay free of connection logic
//! and remain testable with a substitutable store.
//!
//! # Concurrency
//!
//! Request handling is event-driven on the tokio runtime; suspension
//! points are the store I/O calls and the broadcast subscription. Every
//! CRUD operation is a single store call, so no locking discipline is
//! needed beyond the handle's own transitions.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Todo CRUD handlers
pub mod todos;

/// Store abstraction and connection management
pub mod store;

/// Real-time snapshot broadcasting
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::ApiError;
pub use realtime::{broadcast_snapshot, TodoSnapshotBroadcast};
pub use server::{create_app, AppState};
pub use store::{MemoryTodoStore, PgTodoStore, StoreHandle, TodoStore};
