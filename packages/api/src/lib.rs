// ABOUTME: HTTP gateway for TaskFlow providing REST endpoints and routing
// ABOUTME: Translates each verb on /tasks and /categories into one storage operation

use axum::{
    routing::{get, put},
    Router,
};

use taskflow_storage::DbState;

pub mod auth;
pub mod categories_handlers;
pub mod health;
pub mod response;
pub mod tasks_handlers;

use response::method_not_allowed;

/// Creates the tasks API router (nested under /api/tasks)
pub fn create_tasks_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(tasks_handlers::list_tasks)
                .post(tasks_handlers::create_task)
                .fallback(method_not_allowed),
        )
        .route(
            "/{task_id}",
            put(tasks_handlers::update_task)
                .delete(tasks_handlers::delete_task)
                .fallback(method_not_allowed),
        )
}

/// Creates the categories API router (nested under /api/categories)
pub fn create_categories_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(categories_handlers::list_categories)
                .post(categories_handlers::create_category)
                .fallback(method_not_allowed),
        )
        .route(
            "/{category_id}",
            put(categories_handlers::update_category)
                .delete(categories_handlers::delete_category)
                .fallback(method_not_allowed),
        )
}

/// Creates the full application router mounted under /api
pub fn create_router(db: DbState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .nest("/tasks", create_tasks_router())
        .nest("/categories", create_categories_router());

    Router::new().nest("/api", api).with_state(db)
}
