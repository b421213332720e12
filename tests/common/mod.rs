//! Shared test fixtures
//!
//! Builds an in-process test server over the real router with an
//! injected in-memory store, so the handler set is exercised end-to-end
//! without a database.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use todosync::backend::routes::router::create_router;
use todosync::backend::server::state::AppState;
use todosync::backend::store::MemoryTodoStore;

/// A running test application
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: MemoryTodoStore,
}

/// Spawn the app with an empty in-memory store
pub fn spawn_app() -> TestApp {
    let store = MemoryTodoStore::new();
    let state = AppState::with_store(Arc::new(store.clone()));
    let server = TestServer::new(create_router(state.clone())).unwrap();
    TestApp {
        server,
        state,
        store,
    }
}

/// Spawn the app without any store configured
///
/// Store-backed endpoints respond 503 in this configuration.
pub fn spawn_app_without_store() -> TestServer {
    let state = AppState::new(None);
    TestServer::new(create_router(state)).unwrap()
}
