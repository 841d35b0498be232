// ABOUTME: HTTP request handlers for task operations
// ABOUTME: Each handler maps one verb onto one storage operation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::auth::CurrentUser;
use super::response::ApiError;
use taskflow_core::{Task, TaskCreateInput, TaskUpdateInput};
use taskflow_storage::DbState;

/// List all tasks
pub async fn list_tasks(State(db): State<DbState>) -> Result<Json<Vec<Task>>, ApiError> {
    info!("Listing tasks");

    let tasks = db.task_storage.list_tasks().await?;
    Ok(Json(tasks))
}

/// Create a new task
pub async fn create_task(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Json(input): Json<TaskCreateInput>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    info!("Creating task '{}' for user: {}", input.title, current_user.id);

    let task = db.task_storage.create_task(&current_user.id, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Apply a partial update to a task
pub async fn update_task(
    State(db): State<DbState>,
    Path(task_id): Path<String>,
    Json(input): Json<TaskUpdateInput>,
) -> Result<Json<Task>, ApiError> {
    info!("Updating task: {}", task_id);

    let task = db.task_storage.update_task(&task_id, input).await?;
    Ok(Json(task))
}

/// Delete a task
pub async fn delete_task(
    State(db): State<DbState>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    info!("Deleting task: {}", task_id);

    db.task_storage.delete_task(&task_id).await?;
    Ok(Json(json!({ "message": "Task deleted" })))
}
