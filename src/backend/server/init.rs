/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: state creation, store loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the store from configuration (startup connect with retries)
 * 2. Create the application state with its snapshot broadcast channel
 * 3. Create and configure the router
 *
 * # Error Handling
 *
 * Initialization is resilient: a missing or unreachable store never
 * prevents startup. Store-backed endpoints respond 503 until the lazy
 * reconnection succeeds.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing todosync backend server");

    let store = load_store().await;
    let app_state = AppState::new(store);

    tracing::info!("Application state and snapshot channel initialized");

    create_router(app_state)
}
