//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and the backend. These types are used for serialization and
//! communication over the REST API and the snapshot subscription channel.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All types are designed for
//! serialization and transmission over HTTP.

/// Todo record and request shapes
pub mod todo;

/// List snapshot event for the realtime channel
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use todo::{CreateTodoRequest, DeleteTodoResponse, Priority, Todo, UpdateTodoRequest};
pub use event::TodoListSnapshot;
pub use error::SharedError;
