//! TodoSync - Main Library
//!
//! TodoSync is a small todo-list service built with Rust: an Axum HTTP
//! server exposing CRUD endpoints over a PostgreSQL-backed store, a
//! realtime change channel that pushes full list snapshots to
//! subscribers, and a native client library that mirrors the list
//! locally and only repaints from store-confirmed state.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between client and backend
//!   - The todo record and request/response shapes
//!   - List snapshot events
//!   - Error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with the CRUD handler set
//!   - Store abstraction with an explicit connection manager
//!   - Real-time snapshot broadcasting over SSE
//!
//! - **`client`** - Sync client library
//!   - REST client over the server's API surface
//!   - Realtime sync state machine (remote-echo only, no optimistic UI)
//!   - Local cache mirror for instant initial paint
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use todosync::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Use app with Axum server
//! # }
//! ```
//!
//! ## Client-Side
//!
//! ```rust,no_run
//! use todosync::client::{config::ClientConfig, rest::TodoApiClient, sync::SyncClient};
//!
//! # fn example() {
//! let api = TodoApiClient::new(ClientConfig::new());
//! let mut sync = SyncClient::new(api);
//! sync.load_cached();
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is thread-safe using `Arc` and `broadcast::Sender`;
//! the connection handle serializes its own state transitions so
//! handlers never coordinate directly.
//!
//! # Error Handling
//!
//! The library uses Rust's standard error handling:
//!
//! - `Result<T, E>` for fallible operations
//! - `Option<T>` for optional values
//! - Custom error types in `shared::error` and `backend::error`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

/// Sync client library
pub mod client;
