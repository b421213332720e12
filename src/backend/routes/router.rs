/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * Routes are added in a specific order:
 * 1. Probe routes (service info, health)
 * 2. Todo API routes (CRUD + snapshot subscription)
 * 3. Static file service
 * 4. Fallback handler (404)
 */

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::backend::routes::probes;
use crate::backend::routes::todo_routes::configure_todo_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Probes
///
/// - `GET /` - service info
/// - `GET /health` - liveness probe
/// - `GET /api` - API info
///
/// ## Todo API
///
/// - `GET /api/todos` - list, newest-first
/// - `POST /api/todos` - create
/// - `GET /api/todos/subscribe` - SSE snapshot stream
/// - `GET /api/todos/{id}` - get one
/// - `PUT /api/todos/{id}` - update
/// - `DELETE /api/todos/{id}` - delete
///
/// ## Static Files
///
/// Static assets are served from the `public` directory under `/static`.
///
/// ## Fallback
///
/// Unknown routes return 404.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/", get(probes::service_info))
        .route("/health", get(probes::health))
        .route("/api", get(probes::api_info));

    let router = configure_todo_routes(router);

    let router = router.nest_service("/static", ServeDir::new("public"));

    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router.with_state(app_state)
}
