// ABOUTME: Router-level tests for the task and category endpoints
// ABOUTME: Drives the axum router with oneshot requests against in-memory SQLite

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskflow_api::create_router;
use taskflow_storage::DbState;

async fn test_app() -> Router {
    let db = DbState::in_memory().await.unwrap();
    create_router(db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "taskflow-api");
}

#[tokio::test]
async fn test_list_tasks_starts_empty() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_task_returns_201_with_identity() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "title": "Write report",
            "description": "Quarterly numbers",
            "status": "in-progress",
            "priority": "high",
            "category": "Work",
            "dueDate": "2025-04-15"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["status"], "in-progress");
    assert_eq!(body["dueDate"], "2025-04-15T00:00:00Z");
    assert_eq!(body["userId"], "1");
    assert_eq!(body["createdAt"], body["updatedAt"]);

    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_task_uses_user_header() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tasks")
        .header("content-type", "application/json")
        .header("x-user-id", "user-42")
        .body(Body::from(
            json!({"title": "Mine", "dueDate": "2025-04-15"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["userId"], "user-42");
}

#[tokio::test]
async fn test_create_task_without_title_is_bad_request() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "dueDate": "2025-04-15" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_update_task_merges_fields() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({"title": "A", "description": "keep me", "dueDate": "2025-04-15"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{}", id),
        Some(json!({ "status": "done" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "done");
    assert_eq!(updated["description"], "keep me");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_missing_task_is_404() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/tasks/missing",
        Some(json!({ "status": "done" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_delete_task_twice() {
    let app = test_app().await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({"title": "A", "dueDate": "2025-04-15"})),
    )
    .await;
    let uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());

    let (first, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted");

    let (second, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_methods_return_405() {
    let app = test_app().await;

    let cases = [
        (Method::PATCH, "/api/tasks"),
        (Method::DELETE, "/api/tasks"),
        (Method::GET, "/api/tasks/abc"),
        (Method::POST, "/api/categories/abc"),
        (Method::PUT, "/api/categories"),
    ];

    for (method, uri) in cases {
        let (status, _) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_category_crud() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Work", "color": "#0ea5e9" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/categories/{}", id),
        Some(json!({ "color": "#ef4444" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Work");
    assert_eq!(updated["color"], "#ef4444");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/categories/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, Method::GET, "/api/categories", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_duplicate_category_name_conflicts() {
    let app = test_app().await;
    let body = json!({ "name": "Work", "color": "#0ea5e9" });

    let (first, _) = send(&app, Method::POST, "/api/categories", Some(body.clone())).await;
    let (second, error) = send(&app, Method::POST, "/api/categories", Some(body)).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(error["success"], false);
}

#[tokio::test]
async fn test_invalid_category_color_is_bad_request() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Work", "color": "blue" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
