//! Client Module
//!
//! The sync client library: everything the frontend needs short of
//! actually drawing the list.
//!
//! # Module Structure
//!
//! - **`config`** - server location from the environment
//! - **`rest`** - async REST client over the todo API
//! - **`sync`** - the realtime sync state machine
//! - **`cache`** - local snapshot mirror for instant initial paint
//! - **`subscribe`** - SSE stream consumption
//!
//! # Design
//!
//! The sync client never updates its visible list optimistically: local
//! actions only issue requests, and the list repaints when the
//! store-confirmed snapshot arrives through the subscription. Tests
//! assert exactly that.

/// Client configuration
pub mod config;

/// REST API client
pub mod rest;

/// Realtime sync state machine
pub mod sync;

/// Local cache mirror
pub mod cache;

/// Snapshot subscription consumer
pub mod subscribe;

// Re-export commonly used types
pub use cache::CacheMirror;
pub use config::ClientConfig;
pub use rest::{ClientError, TodoApiClient};
pub use subscribe::{run_subscription, SseParser};
pub use sync::SyncClient;
