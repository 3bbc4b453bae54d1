//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to one endpoint, delegates to the service layer,
//! and turns an absent record into [`AppError::NotFound`].

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{
    CreateCommentRequest, CreatePostRequest, HealthResponse, MessageResponse, UpdatePostRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{Comment, CommentId, Post, PostId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Posts
// =============================================================================

/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> HandlerResult<Vec<Post>> {
    let posts = db_services::list_posts(state.repository.as_ref()).await?;
    Ok(Json(posts))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Post> {
    db_services::get_post(state.repository.as_ref(), PostId::new(id))
        .await?
        .map(Json)
        .ok_or_else(AppError::post_not_found)
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> HandlerResult<Post> {
    let post = db_services::create_post(state.repository.as_ref(), request.into()).await?;
    Ok(Json(post))
}

/// PUT /posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> HandlerResult<Post> {
    db_services::update_post(state.repository.as_ref(), PostId::new(id), request.into())
        .await?
        .map(Json)
        .ok_or_else(AppError::post_not_found)
}

/// DELETE /posts/{id}
///
/// Removes the post together with all of its comments.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    if db_services::delete_post(state.repository.as_ref(), PostId::new(id)).await? {
        Ok(Json(MessageResponse::new("Post deleted successfully")))
    } else {
        Err(AppError::post_not_found())
    }
}

/// PATCH /posts/{id}/views
pub async fn increment_views(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Post> {
    db_services::increment_views(state.repository.as_ref(), PostId::new(id))
        .await?
        .map(Json)
        .ok_or_else(AppError::post_not_found)
}

// =============================================================================
// Comments
// =============================================================================

/// POST /posts/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> HandlerResult<Comment> {
    db_services::add_comment(state.repository.as_ref(), PostId::new(id), request.into())
        .await?
        .map(Json)
        .ok_or_else(AppError::post_not_found)
}

/// DELETE /posts/{id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(i64, i64)>,
) -> HandlerResult<MessageResponse> {
    let deleted = db_services::delete_comment(
        state.repository.as_ref(),
        PostId::new(id),
        CommentId::new(comment_id),
    )
    .await?;

    if deleted {
        Ok(Json(MessageResponse::new("Comment deleted successfully")))
    } else {
        Err(AppError::comment_not_found())
    }
}
