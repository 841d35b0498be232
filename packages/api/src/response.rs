// ABOUTME: Shared API response types and error handling
// ABOUTME: Maps storage failures onto HTTP status codes with a consistent error body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use taskflow_storage::StorageError;

/// Standard API response wrapper, used for error bodies
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Errors a gateway handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            ApiError::Storage(storage_error) => match storage_error {
                StorageError::NotFound(_) => (StatusCode::NOT_FOUND, storage_error.to_string()),
                StorageError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, storage_error.to_string())
                }
                StorageError::DuplicateName(_) => (StatusCode::CONFLICT, storage_error.to_string()),
                StorageError::Sqlx(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(error = %self, "Storage system error");
        } else {
            info!(status = %status, error = %self, "API error response");
        }

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Fallback for methods a resource path does not support
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
