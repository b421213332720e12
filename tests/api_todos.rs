//! Todo API integration tests
//!
//! Exercises the CRUD surface end-to-end through the real router with
//! an injected in-memory store.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use todosync::shared::todo::Todo;

use common::{spawn_app, spawn_app_without_store};

#[tokio::test]
async fn create_returns_201_with_id_and_timestamps() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "buy milk" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let todo: Todo = response.json();
    assert_eq!(todo.text, "buy milk");
    assert!(todo.created_at <= todo.updated_at);
}

#[tokio::test]
async fn create_trims_text_and_get_returns_it() {
    let app = spawn_app();

    let created: Todo = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "  buy milk  " }))
        .await
        .json();
    assert_eq!(created.text, "buy milk");

    let response = app.server.get(&format!("/api/todos/{}", created.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let fetched: Todo = response.json();
    assert_eq!(fetched.text, "buy milk");
    assert!(fetched.created_at <= fetched.updated_at);
}

#[tokio::test]
async fn create_with_whitespace_only_text_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    // Nothing was persisted
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn list_is_sorted_newest_first_regardless_of_insertion_order() {
    let app = spawn_app();
    let base = Utc::now() - Duration::minutes(10);

    // Insert out of chronological order using client-observed timestamps
    for (offset, text) in [(120i64, "second"), (300, "first"), (30, "third")] {
        let created_at = base + Duration::seconds(300 - offset);
        let response = app
            .server
            .post("/api/todos")
            .json(&json!({ "text": text, "createdAt": created_at }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let todos: Vec<Todo> = app.server.get("/api/todos").await.json();
    assert_eq!(todos.len(), 3);

    let times: Vec<DateTime<Utc>> = todos.iter().map(|t| t.created_at).collect();
    let mut sorted = times.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(times, sorted);
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let app = spawn_app();

    let response = app
        .server
        .get(&format!("/api/todos/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_returns_400() {
    let app = spawn_app();

    for method_path in ["get", "put", "delete"] {
        let response = match method_path {
            "get" => app.server.get("/api/todos/not-a-uuid").await,
            "put" => {
                app.server
                    .put("/api/todos/not-a-uuid")
                    .json(&json!({ "text": "x" }))
                    .await
            }
            _ => app.server.delete("/api/todos/not-a-uuid").await,
        };
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn update_unknown_id_returns_404_and_leaves_store_unmodified() {
    let app = spawn_app();

    let created: Todo = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "buy milk" }))
        .await
        .json();

    let response = app
        .server
        .put(&format!("/api/todos/{}", uuid::Uuid::new_v4()))
        .json(&json!({ "text": "something else" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let todos: Vec<Todo> = app.server.get("/api/todos").await.json();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, created.text);
}

#[tokio::test]
async fn update_with_empty_text_is_rejected_and_record_unchanged() {
    let app = spawn_app();

    let created: Todo = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "buy milk" }))
        .await
        .json();

    let response = app
        .server
        .put(&format!("/api/todos/{}", created.id))
        .json(&json!({ "text": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let fetched: Todo = app
        .server
        .get(&format!("/api/todos/{}", created.id))
        .await
        .json();
    assert_eq!(fetched.text, "buy milk");
}

#[tokio::test]
async fn partial_update_refreshes_updated_at_only() {
    let app = spawn_app();

    let created: Todo = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "buy milk" }))
        .await
        .json();

    let response = app
        .server
        .put(&format!("/api/todos/{}", created.id))
        .json(&json!({ "completed": true }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated: Todo = response.json();
    assert!(updated.completed);
    assert_eq!(updated.text, "buy milk");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn delete_removes_record_and_second_delete_returns_404() {
    let app = spawn_app();

    let created: Todo = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "buy milk" }))
        .await
        .json();

    let response = app
        .server
        .delete(&format!("/api/todos/{}", created.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let get_response = app.server.get(&format!("/api/todos/{}", created.id)).await;
    assert_eq!(get_response.status_code(), StatusCode::NOT_FOUND);

    let second = app
        .server
        .delete(&format!("/api/todos/{}", created.id))
        .await;
    assert_eq!(second.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_scenario_buy_milk_appears_first_in_list() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "buy milk" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let created: Todo = response.json();

    let todos: Vec<Todo> = app.server.get("/api/todos").await.json();
    assert_eq!(todos[0].text, "buy milk");
    assert_eq!(todos[0].id, created.id);
}

#[tokio::test]
async fn future_client_timestamp_is_clamped_to_server_clock() {
    let app = spawn_app();

    let far_future = Utc::now() + Duration::hours(6);
    let created: Todo = app
        .server
        .post("/api/todos")
        .json(&json!({ "text": "buy milk", "createdAt": far_future }))
        .await
        .json();

    assert!(created.created_at <= created.updated_at);
    assert!(created.created_at < far_future);
}

#[tokio::test]
async fn store_backed_endpoints_return_503_without_store() {
    let server = spawn_app_without_store();

    let response = server.get("/api/todos").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = response.json();
    let message = body.get("error").and_then(|e| e.as_str()).unwrap();
    assert!(message.contains("DATABASE_URL"));
}

#[tokio::test]
async fn probe_endpoints_are_always_up() {
    let server = spawn_app_without_store();

    for path in ["/", "/health", "/api"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK, "probe {}", path);
    }
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = spawn_app();
    let response = app.server.get("/api/unknown").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
