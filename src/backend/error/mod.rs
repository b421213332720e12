//! Backend Error Module
//!
//! This module defines the error types used by the HTTP handlers and
//! their conversion to HTTP responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse)
//!
//! # Error Taxonomy
//!
//! - `Validation` - empty required field, 400
//! - `InvalidId` - malformed id format, 400
//! - `NotFound` - unknown record id, 404
//! - `Unavailable` - store unreachable, 503 with remediation hint
//! - `Store` - anything else from the store, 500 with a generic body
//!
//! # HTTP Response Conversion
//!
//! `ApiError` implements `IntoResponse`, so handlers return
//! `Result<_, ApiError>` and propagate with `?`. The response body is a
//! JSON object with `error` and `status` fields.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
