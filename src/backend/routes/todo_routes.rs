/**
 * Todo API Routes
 *
 * Wires the CRUD handler set and the snapshot subscription onto the
 * `/api/todos` prefix. The `subscribe` segment is registered as a static
 * route so it wins over the `{id}` matcher.
 */

use axum::routing::get;
use axum::Router;

use crate::backend::realtime::subscription::handle_snapshot_subscription;
use crate::backend::server::state::AppState;
use crate::backend::todos::handlers::{
    create_todo, delete_todo, get_todo, list_todos, update_todo,
};

/// Configure the todo API routes
///
/// - `GET /api/todos` - list
/// - `POST /api/todos` - create
/// - `GET /api/todos/subscribe` - SSE snapshot stream
/// - `GET /api/todos/{id}` - get one
/// - `PUT /api/todos/{id}` - update
/// - `DELETE /api/todos/{id}` - delete
pub fn configure_todo_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/subscribe", get(handle_snapshot_subscription))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
