//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies are deserialized into these schema structs and then
//! converted into the model write-inputs, so the wire shape stays decoupled
//! from what the repositories store. Responses reuse the model records, which
//! already serialize to the public representation.

use serde::{Deserialize, Serialize};

pub use crate::models::{Comment, Post};
use crate::models::{NewComment, NewPost, PostChanges};

/// Request body for `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost::new(req.title, req.content)
    }
}

/// Request body for `PUT /posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
}

impl UpdatePostRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        PostChanges::new(req.title, req.content)
    }
}

/// Request body for `POST /posts/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

impl CreateCommentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl From<CreateCommentRequest> for NewComment {
    fn from(req: CreateCommentRequest) -> Self {
        NewComment::new(req.content)
    }
}

/// Confirmation body returned by delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Store connection status
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_request_ignores_client_id() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"id": 99, "title": "A", "content": "B"}"#).unwrap();
        let new_post: NewPost = req.into();
        assert_eq!(new_post, NewPost::new("A", "B"));
    }

    #[test]
    fn test_empty_title_is_accepted() {
        let req: UpdatePostRequest =
            serde_json::from_str(r#"{"title": "", "content": "x"}"#).unwrap();
        let changes: PostChanges = req.into();
        assert!(changes.title.is_empty());
    }

    #[test]
    fn test_comment_request_requires_content() {
        let result: Result<CreateCommentRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
