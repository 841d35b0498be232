// ABOUTME: Authentication context for API requests
// ABOUTME: Resolves the owning user from the X-User-Id header with a single-user default

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use taskflow_core::DEFAULT_USER_ID;

/// Header carrying the authenticated principal
pub const USER_ID_HEADER: &str = "x-user-id";

/// Current authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

impl CurrentUser {
    fn default_user() -> Self {
        Self {
            id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid X-User-Id header"))?,
            None => return Ok(Self::default_user()),
        };

        let id = header.trim();
        if id.is_empty() {
            return Ok(Self::default_user());
        }

        Ok(Self { id: id.to_string() })
    }
}
