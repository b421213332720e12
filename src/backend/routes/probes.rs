/**
 * Probe Handlers
 *
 * Liveness and info endpoints: `GET /`, `GET /health`, `GET /api`.
 * These never touch the store, so they stay green while the database is
 * down and a load balancer can tell "process up" from "store up".
 */

use axum::Json;
use serde_json::{json, Value};

/// Service info (GET /)
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "todosync",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

/// Liveness probe (GET /health)
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// API info (GET /api)
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "todosync API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /api/todos",
            "POST /api/todos",
            "GET /api/todos/subscribe",
            "GET /api/todos/{id}",
            "PUT /api/todos/{id}",
            "DELETE /api/todos/{id}",
        ],
    }))
}
