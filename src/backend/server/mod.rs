//! Server Module
//!
//! This module contains the code for initializing and configuring the
//! Axum HTTP server.
//!
//! # Module Structure
//!
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`config`** - configuration loading (store, listen port)
//! - **`init`** - server initialization and app creation
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: reads `DATABASE_URL` and attempts the
//!    startup connection (3 attempts, fixed backoff)
//! 2. **State Creation**: builds `AppState` with the injected store and
//!    the snapshot broadcast channel
//! 3. **Router Creation**: assembles probes, the todo API, static files
//!    and the fallback

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::create_app;
pub use state::AppState;
