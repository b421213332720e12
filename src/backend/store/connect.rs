/**
 * Store Connection Manager
 *
 * This module owns the process-wide connection to PostgreSQL as an
 * explicit resource with documented state transitions:
 *
 * ```text
 * disconnected -> connecting -> connected -> disconnecting -> disconnected
 *        ^            |
 *        +------------+  (failed attempt)
 * ```
 *
 * Every CRUD operation goes through `ensure_connection()`:
 *
 * - `connected` - returns the pool immediately
 * - `connecting` - another request's attempt is in flight; waits for it,
 *   bounded by a timeout, and fails with a connectivity error on expiry
 * - `disconnected` - initiates a new attempt; on failure the process
 *   keeps running and the caller decides how to respond (the handlers
 *   map it to 503)
 *
 * `connect_with_retry()` is the startup variant: a fixed number of
 * attempts with a fixed backoff. If all attempts fail the server still
 * starts and lazy per-request reconnection takes over.
 *
 * Connection failures are logged with message, driver code, and a
 * category derived from the error text (authentication, timeout, DNS).
 */

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::{Mutex, Notify};
use tokio::time::{timeout, Instant};

use crate::backend::store::StoreError;

/// Database name appended when the connection string has no path
pub const DEFAULT_DATABASE_NAME: &str = "todos";

/// Bound on waiting for an in-flight connection attempt
pub const CONNECT_WAIT_TIMEOUT: Duration = Duration::from_secs(8);

/// Per-attempt connect/acquire timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Startup retry policy
pub const STARTUP_ATTEMPTS: u32 = 3;
pub const STARTUP_BACKOFF: Duration = Duration::from_secs(5);

const MAX_CONNECTIONS: u32 = 5;

/// Connection lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No live connection; the next `ensure_connection` starts one
    Disconnected,
    /// An attempt is in flight; other callers wait for its outcome
    Connecting,
    /// A pool is available
    Connected,
    /// A graceful shutdown is draining the pool
    Disconnecting,
}

/// Connection-failure categories for diagnostics
///
/// Derived from the driver's error text; used only for logging, never
/// for control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Timeout,
    Dns,
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Dns => "dns",
            ErrorCategory::Other => "other",
        }
    }
}

/// Classify a connection failure by its error text
///
/// Pattern matching on the message is the best the driver offers for
/// failures that never reach the server (DNS, timeouts), so all three
/// categories are derived the same way.
pub fn categorize_error(message: &str) -> ErrorCategory {
    let lower = message.to_lowercase();
    if lower.contains("password authentication")
        || lower.contains("authentication failed")
        || lower.contains("password")
    {
        ErrorCategory::Authentication
    } else if lower.contains("timed out") || lower.contains("timeout") {
        ErrorCategory::Timeout
    } else if lower.contains("failed to lookup address")
        || lower.contains("name or service not known")
        || lower.contains("no such host")
        || lower.contains("dns")
    {
        ErrorCategory::Dns
    } else {
        ErrorCategory::Other
    }
}

/// Append the default database name when the URL carries no path
///
/// The connection string is accepted with or without an explicit
/// database suffix; `postgres://host:5432` becomes
/// `postgres://host:5432/todos`. Query strings are preserved and
/// non-URL-shaped input is left untouched.
pub fn normalize_database_url(url: &str, default_db: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };

    let rebuilt = match base.split_once("://") {
        Some((scheme, rest)) => match rest.split_once('/') {
            Some((_, db)) if !db.is_empty() => base.to_string(),
            Some((authority, _)) => format!("{}://{}/{}", scheme, authority, default_db),
            None => format!("{}://{}/{}", scheme, rest, default_db),
        },
        None => base.to_string(),
    };

    match query {
        Some(query) => format!("{}?{}", rebuilt, query),
        None => rebuilt,
    }
}

struct HandleInner {
    state: ConnectionState,
    pool: Option<PgPool>,
}

/// The process-wide connection handle
///
/// Cheap to clone; all clones share the same state. The handle is the
/// only owner of connection-state transitions, so handlers never
/// coordinate on the pool themselves.
#[derive(Clone)]
pub struct StoreHandle {
    url: String,
    inner: Arc<Mutex<HandleInner>>,
    notify: Arc<Notify>,
    wait_timeout: Duration,
}

impl StoreHandle {
    /// Create a disconnected handle for a (normalized) connection string
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: normalize_database_url(&url.into(), DEFAULT_DATABASE_NAME),
            inner: Arc::new(Mutex::new(HandleInner {
                state: ConnectionState::Disconnected,
                pool: None,
            })),
            notify: Arc::new(Notify::new()),
            wait_timeout: CONNECT_WAIT_TIMEOUT,
        }
    }

    /// Override the in-flight wait bound (tests use short timeouts)
    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// The normalized connection string this handle targets
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ConnectionState {
        self.inner.lock().await.state
    }

    /// Return a live pool, connecting first if necessary
    ///
    /// See the module docs for the per-state behavior. Failures are
    /// reported as `StoreError::Unavailable`; the process never crashes
    /// on an unreachable store.
    pub async fn ensure_connection(&self) -> Result<PgPool, StoreError> {
        let deadline = Instant::now() + self.wait_timeout;

        loop {
            enum Action {
                Use(PgPool),
                Wait,
                Connect,
            }

            let action = {
                let mut inner = self.inner.lock().await;
                match inner.state {
                    ConnectionState::Connected => match &inner.pool {
                        Some(pool) => Action::Use(pool.clone()),
                        // Connected without a pool cannot normally happen;
                        // recover by reconnecting.
                        None => {
                            inner.state = ConnectionState::Connecting;
                            Action::Connect
                        }
                    },
                    ConnectionState::Connecting | ConnectionState::Disconnecting => Action::Wait,
                    ConnectionState::Disconnected => {
                        inner.state = ConnectionState::Connecting;
                        Action::Connect
                    }
                }
            };

            match action {
                Action::Use(pool) => return Ok(pool),
                Action::Connect => return self.attempt_connect().await,
                Action::Wait => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(StoreError::unavailable(format!(
                            "timed out after {:?} waiting for the store connection",
                            self.wait_timeout
                        )));
                    }
                    // Wake on attempt completion or deadline, then re-check
                    // the state either way.
                    let _ = timeout(deadline - now, self.notify.notified()).await;
                }
            }
        }
    }

    /// Startup connection with bounded retries and fixed backoff
    ///
    /// Logs each failed attempt and returns the last error if every
    /// attempt fails; the handle is left disconnected and per-request
    /// reconnection takes over.
    pub async fn connect_with_retry(
        &self,
        attempts: u32,
        backoff: Duration,
    ) -> Result<PgPool, StoreError> {
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.ensure_connection().await {
                Ok(pool) => return Ok(pool),
                Err(e) => {
                    tracing::warn!(
                        "Store connection attempt {}/{} failed: {}",
                        attempt,
                        attempts,
                        e
                    );
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| StoreError::unavailable("no connection attempts were made")))
    }

    /// Gracefully close the pool
    pub async fn disconnect(&self) {
        let pool = {
            let mut inner = self.inner.lock().await;
            if inner.state != ConnectionState::Connected {
                return;
            }
            inner.state = ConnectionState::Disconnecting;
            inner.pool.take()
        };

        if let Some(pool) = pool {
            pool.close().await;
        }

        {
            let mut inner = self.inner.lock().await;
            inner.state = ConnectionState::Disconnected;
        }
        self.notify.notify_waiters();
        tracing::info!("Store connection closed");
    }

    async fn attempt_connect(&self) -> Result<PgPool, StoreError> {
        tracing::info!("Connecting to store...");

        let result = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(CONNECT_TIMEOUT)
            .connect(&self.url)
            .await;

        match result {
            Ok(pool) => {
                run_migrations(&pool).await;

                {
                    let mut inner = self.inner.lock().await;
                    inner.pool = Some(pool.clone());
                    inner.state = ConnectionState::Connected;
                }
                self.notify.notify_waiters();
                tracing::info!("Store connection established");
                Ok(pool)
            }
            Err(e) => {
                let message = e.to_string();
                let code = match &e {
                    sqlx::Error::Database(db) => db.code().map(|c| c.to_string()),
                    _ => None,
                };
                let category = categorize_error(&message);
                tracing::error!(
                    error = %message,
                    code = ?code,
                    category = category.as_str(),
                    "Store connection failed"
                );

                {
                    let mut inner = self.inner.lock().await;
                    inner.state = ConnectionState::Disconnected;
                    inner.pool = None;
                }
                self.notify.notify_waiters();
                Err(StoreError::unavailable(format!(
                    "failed to connect to store: {}",
                    message
                )))
            }
        }
    }
}

/// Apply pending migrations, logging failures without aborting
///
/// Migrations are idempotent, so running them after every (re)connect is
/// safe. A failure here usually means they were already applied by
/// another process.
async fn run_migrations(pool: &PgPool) {
    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(e) => tracing::warn!("Failed to run database migrations: {:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_authentication() {
        assert_eq!(
            categorize_error("password authentication failed for user \"todo\""),
            ErrorCategory::Authentication
        );
    }

    #[test]
    fn test_categorize_timeout() {
        assert_eq!(
            categorize_error("pool timed out while waiting for an open connection"),
            ErrorCategory::Timeout
        );
        assert_eq!(
            categorize_error("connection timeout expired"),
            ErrorCategory::Timeout
        );
    }

    #[test]
    fn test_categorize_dns() {
        assert_eq!(
            categorize_error("failed to lookup address information"),
            ErrorCategory::Dns
        );
        assert_eq!(
            categorize_error("Name or service not known"),
            ErrorCategory::Dns
        );
    }

    #[test]
    fn test_categorize_other() {
        assert_eq!(
            categorize_error("relation \"todos\" does not exist"),
            ErrorCategory::Other
        );
    }

    #[test]
    fn test_normalize_appends_default_database() {
        assert_eq!(
            normalize_database_url("postgres://localhost:5432", "todos"),
            "postgres://localhost:5432/todos"
        );
        assert_eq!(
            normalize_database_url("postgres://localhost:5432/", "todos"),
            "postgres://localhost:5432/todos"
        );
    }

    #[test]
    fn test_normalize_keeps_explicit_database() {
        assert_eq!(
            normalize_database_url("postgres://localhost:5432/mydb", "todos"),
            "postgres://localhost:5432/mydb"
        );
    }

    #[test]
    fn test_normalize_preserves_query_string() {
        assert_eq!(
            normalize_database_url("postgres://localhost:5432?sslmode=require", "todos"),
            "postgres://localhost:5432/todos?sslmode=require"
        );
        assert_eq!(
            normalize_database_url("postgres://localhost/mydb?sslmode=require", "todos"),
            "postgres://localhost/mydb?sslmode=require"
        );
    }

    #[test]
    fn test_normalize_leaves_non_url_input() {
        assert_eq!(normalize_database_url("not a url", "todos"), "not a url");
    }

    #[tokio::test]
    async fn test_handle_starts_disconnected() {
        let handle = StoreHandle::new("postgres://localhost:5432/todos");
        assert_eq!(handle.state().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_handle_normalizes_url() {
        let handle = StoreHandle::new("postgres://localhost:5432");
        assert_eq!(handle.url(), "postgres://localhost:5432/todos");
    }

    #[tokio::test]
    async fn test_ensure_connection_failure_reports_unavailable() {
        // Nothing listens on the discard port, so the attempt fails fast
        let handle = StoreHandle::new("postgres://127.0.0.1:9/todos")
            .with_wait_timeout(Duration::from_millis(200));

        let result = handle.ensure_connection().await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
        assert_eq!(handle.state().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_disconnect_without_connection_is_noop() {
        let handle = StoreHandle::new("postgres://localhost:5432/todos");
        handle.disconnect().await;
        assert_eq!(handle.state().await, ConnectionState::Disconnected);
    }
}
