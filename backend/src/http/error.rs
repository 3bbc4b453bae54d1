//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// Message returned when a post id does not resolve.
pub const POST_NOT_FOUND: &str = "Post not found";
/// Message returned when a comment id does not resolve.
pub const COMMENT_NOT_FOUND: &str = "Comment not found";

/// API error response body, `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub detail: String,
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Referenced post or comment does not exist (404)
    NotFound(&'static str),
    /// Store failure; the raw error text is returned (500)
    Repository(RepositoryError),
}

impl AppError {
    pub fn post_not_found() -> Self {
        AppError::NotFound(POST_NOT_FOUND)
    }

    pub fn comment_not_found() -> Self {
        AppError::NotFound(COMMENT_NOT_FOUND)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new(msg)),
            AppError::Repository(e) => {
                tracing::error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(e.to_string()))
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::post_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_body_is_detail_only() {
        let body = serde_json::to_value(ApiError::new(POST_NOT_FOUND)).unwrap();
        assert_eq!(body, serde_json::json!({"detail": "Post not found"}));
    }

    #[test]
    fn test_repository_error_maps_to_500() {
        let response = AppError::from(RepositoryError::connection("down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_repository_not_found_is_still_a_store_failure() {
        // a row vanishing inside a statement is not a client-facing 404
        let response = AppError::from(RepositoryError::not_found("Record not found")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
