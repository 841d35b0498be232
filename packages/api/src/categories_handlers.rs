// ABOUTME: HTTP request handlers for category operations
// ABOUTME: Handles CRUD operations for categories with database integration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use super::auth::CurrentUser;
use super::response::ApiError;
use taskflow_core::{Category, CategoryCreateInput, CategoryUpdateInput};
use taskflow_storage::DbState;

/// List all categories
pub async fn list_categories(
    State(db): State<DbState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    info!("Listing categories");

    let categories = db.category_storage.list_categories().await?;
    Ok(Json(categories))
}

/// Create a new category
pub async fn create_category(
    State(db): State<DbState>,
    current_user: CurrentUser,
    Json(input): Json<CategoryCreateInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    info!("Creating category: {}", input.name);

    let category = db
        .category_storage
        .create_category(&current_user.id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category
pub async fn update_category(
    State(db): State<DbState>,
    Path(category_id): Path<String>,
    Json(input): Json<CategoryUpdateInput>,
) -> Result<Json<Category>, ApiError> {
    info!("Updating category: {}", category_id);

    let category = db
        .category_storage
        .update_category(&category_id, input)
        .await?;
    Ok(Json(category))
}

/// Delete a category; tasks referencing it are left alone
pub async fn delete_category(
    State(db): State<DbState>,
    Path(category_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    info!("Deleting category: {}", category_id);

    db.category_storage.delete_category(&category_id).await?;
    Ok(Json(json!({ "message": "Category deleted" })))
}
