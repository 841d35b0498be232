// ABOUTME: Error taxonomy shared by every gateway implementation
// ABOUTME: Maps transport failures and HTTP statuses onto four error kinds

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use taskflow_core::ValidationError;
use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Coarse classification of a gateway failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    NotFound,
    Validation,
    Server,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Network => "network",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::Server => "server",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Network(_) => ErrorKind::Network,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::Validation(_) => ErrorKind::Validation,
            GatewayError::Server(_) => ErrorKind::Server,
        }
    }

    /// Inner message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Network(m)
            | GatewayError::NotFound(m)
            | GatewayError::Validation(m)
            | GatewayError::Server(m) => m,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
    }

    /// Classify a non-success HTTP status.
    ///
    /// 404 is NotFound, 400/409/422 are Validation, everything else is Server.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::NOT_FOUND => GatewayError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                GatewayError::Validation(message)
            }
            _ => GatewayError::Server(message),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        // A body that arrived but could not be decoded is a server fault
        if err.is_decode() {
            Self::Server(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<ValidationError> for GatewayError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::NOT_FOUND, ErrorKind::NotFound)]
    #[case(StatusCode::BAD_REQUEST, ErrorKind::Validation)]
    #[case(StatusCode::CONFLICT, ErrorKind::Validation)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::Validation)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Server)]
    #[case(StatusCode::SERVICE_UNAVAILABLE, ErrorKind::Server)]
    #[case(StatusCode::METHOD_NOT_ALLOWED, ErrorKind::Server)]
    fn test_status_classification(#[case] status: StatusCode, #[case] expected: ErrorKind) {
        assert_eq!(GatewayError::from_status(status, "boom").kind(), expected);
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = GatewayError::NotFound("Task abc not found".to_string());
        assert_eq!(err.message(), "Task abc not found");
        assert_eq!(err.to_string(), "Not found: Task abc not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: GatewayError = ValidationError::new("title", "Title is required").into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("title"));
    }
}
