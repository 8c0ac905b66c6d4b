//! HTTP-level tests for the todo API, driving the real router over the
//! in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use todo_server::config::Config;
use todo_server::create_app;
use todo_server::state::AppState;
use todo_store::MemoryTodoStore;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        pg_host: "localhost".to_string(),
        pg_port: 5432,
        pg_user: "todo".to_string(),
        pg_password: "todo".to_string(),
        pg_db: "todo".to_string(),
        sql_echo: false,
        log_level: "info".to_string(),
    }
}

fn test_app() -> Router {
    let state = Arc::new(AppState::new(test_config(), MemoryTodoStore::new()));
    create_app(state)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    (status, bytes)
}

fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

async fn create_todo(app: &Router, content: &str) -> Value {
    let (status, body) =
        request(app, "POST", "/api/v1/todo", Some(json!({ "content": content }))).await;
    assert_eq!(status, StatusCode::OK);
    parse(&body)
}

#[tokio::test]
async fn test_create_returns_persisted_record() {
    let app = test_app();

    let created = create_todo(&app, "buy milk").await;

    assert!(created["id"].is_i64());
    assert_eq!(created["content"], "buy milk");
    assert_eq!(created["created_at"], created["updated_at"]);
    assert!(created.get("deleted_at").is_none());
}

#[tokio::test]
async fn test_create_then_retrieve_round_trip() {
    let app = test_app();

    let created = create_todo(&app, "buy milk").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = request(&app, "GET", &format!("/api/v1/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let retrieved = parse(&body);
    assert_eq!(retrieved["id"], created["id"]);
    assert_eq!(retrieved["content"], created["content"]);
    assert_eq!(retrieved["created_at"], created["created_at"]);
    assert_eq!(retrieved["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn test_retrieve_unknown_id_is_404() {
    let app = test_app();

    let (status, body) = request(&app, "GET", "/api/v1/todo/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let error = parse(&body);
    assert_eq!(error["error"]["message"], "Todo not found");
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let app = test_app();

    create_todo(&app, "a").await;
    create_todo(&app, "b").await;

    let (status, body) = request(&app, "GET", "/api/v1/todo", None).await;
    assert_eq!(status, StatusCode::OK);

    let list = parse(&body);
    assert_eq!(list["count"], 2);

    let contents: Vec<&str> = list["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["b", "a"]);
}

#[tokio::test]
async fn test_update_changes_content_and_keeps_created_at() {
    let app = test_app();

    let created = create_todo(&app, "a").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/api/v1/todo/{id}"),
        Some(json!({ "content": "b" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated = parse(&body);
    assert_eq!(updated["content"], "b");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = test_app();

    let (status, _) = request(
        &app,
        "PUT",
        "/api/v1/todo/999",
        Some(json!({ "content": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_returns_204_with_empty_body() {
    let app = test_app();

    let created = create_todo(&app, "x").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = request(&app, "DELETE", &format!("/api/v1/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_deleted_todo_is_invisible() {
    let app = test_app();

    let created = create_todo(&app, "x").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = request(&app, "DELETE", &format!("/api/v1/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&app, "GET", &format!("/api/v1/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(&app, "GET", "/api/v1/todo", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = parse(&body);
    assert_eq!(list["count"], 0);
    assert!(list["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_second_delete_is_404() {
    let app = test_app();

    let created = create_todo(&app, "x").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = request(&app, "DELETE", &format!("/api/v1/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&app, "DELETE", &format!("/api/v1/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_after_delete_is_404() {
    let app = test_app();

    let created = create_todo(&app, "x").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = request(&app, "DELETE", &format!("/api/v1/todo/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/api/v1/todo/{id}"),
        Some(json!({ "content": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();

    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}
