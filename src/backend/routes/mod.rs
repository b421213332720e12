//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! - **`router`** - Main router creation and route assembly
//! - **`todo_routes`** - Todo API route handlers
//! - **`probes`** - Liveness and info endpoints

/// Main router creation
pub mod router;

/// Todo API route configuration
pub mod todo_routes;

/// Liveness and info endpoints
pub mod probes;

// Re-export commonly used functions
pub use router::create_router;
