/**
 * Server Configuration
 *
 * This module handles loading server configuration from the environment.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - store connection string. Accepted with or without a
 *   database-name suffix; a default name is appended when absent. Unset
 *   means the server runs without a store and store-backed endpoints
 *   respond 503.
 * - `SERVER_PORT` - listen port, default 3000.
 *
 * # Error Handling
 *
 * Configuration errors are logged but never prevent server startup. A
 * store that cannot be reached at startup is retried lazily on each
 * request.
 */

use std::sync::Arc;

use crate::backend::store::connect::{StoreHandle, STARTUP_ATTEMPTS, STARTUP_BACKOFF};
use crate::backend::store::{PgTodoStore, TodoStore};

/// Default listen port when `SERVER_PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 3000;

/// Read the listen port from the environment
pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Load and initialize the store from the environment
///
/// Reads `DATABASE_URL`, builds a connection handle, and attempts the
/// startup connection with bounded retries and fixed backoff. A failed
/// startup connection is logged and the store is returned anyway: the
/// handle reconnects lazily on the next request.
///
/// # Returns
///
/// - `Some(store)` when `DATABASE_URL` is set
/// - `None` when it is not; store-backed endpoints will respond 503
pub async fn load_store() -> Option<Arc<dyn TodoStore>> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Store-backed endpoints will respond 503.");
            return None;
        }
    };

    let handle = StoreHandle::new(database_url);

    match handle
        .connect_with_retry(STARTUP_ATTEMPTS, STARTUP_BACKOFF)
        .await
    {
        Ok(_) => tracing::info!("Store connection pool created successfully"),
        Err(e) => {
            tracing::error!(
                "Initial store connection failed: {}. Continuing; requests will retry lazily.",
                e
            );
        }
    }

    Some(Arc::new(PgTodoStore::new(handle)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_port_default() {
        std::env::remove_var("SERVER_PORT");
        assert_eq!(server_port(), DEFAULT_PORT);
    }

    #[test]
    #[serial]
    fn test_server_port_from_env() {
        std::env::set_var("SERVER_PORT", "8080");
        assert_eq!(server_port(), 8080);
        std::env::remove_var("SERVER_PORT");
    }

    #[test]
    #[serial]
    fn test_server_port_unparsable_falls_back() {
        std::env::set_var("SERVER_PORT", "not-a-port");
        assert_eq!(server_port(), DEFAULT_PORT);
        std::env::remove_var("SERVER_PORT");
    }
}
