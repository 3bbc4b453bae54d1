//! High-level database service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. They work with
//! any implementation of [`FullRepository`], including `dyn FullRepository`
//! behind an `Arc`, and keep write logging consistent across backends.
//!
//! # Usage
//!
//! ```no_run
//! use blog_api::db::{services, repositories::LocalRepository};
//! use blog_api::models::NewPost;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let post = services::create_post(&repo, NewPost::new("Hello", "World")).await?;
//!     let posts = services::list_posts(&repo).await?;
//!     println!("Post {} is one of {}", post.id, posts.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info};

use super::repository::{FullRepository, RepositoryResult};
use crate::models::{Comment, CommentId, NewComment, NewPost, Post, PostChanges, PostId};

// ==================== Health & Connection ====================

/// Check if the backing store is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Posts ====================

/// List all posts with their comments.
pub async fn list_posts<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Post>> {
    let posts = repo.list_posts().await?;
    debug!("listed {} posts", posts.len());
    Ok(posts)
}

/// Fetch a single post with its comments.
pub async fn get_post<R: FullRepository + ?Sized>(
    repo: &R,
    post_id: PostId,
) -> RepositoryResult<Option<Post>> {
    repo.get_post(post_id).await
}

/// Create a post; the store assigns the id and zero views.
pub async fn create_post<R: FullRepository + ?Sized>(
    repo: &R,
    post: NewPost,
) -> RepositoryResult<Post> {
    let created = repo.create_post(post).await?;
    info!("created post {}", created.id);
    Ok(created)
}

/// Replace a post's title and content.
pub async fn update_post<R: FullRepository + ?Sized>(
    repo: &R,
    post_id: PostId,
    changes: PostChanges,
) -> RepositoryResult<Option<Post>> {
    let updated = repo.update_post(post_id, changes).await?;
    if updated.is_some() {
        info!("updated post {}", post_id);
    }
    Ok(updated)
}

/// Add one view to a post.
pub async fn increment_views<R: FullRepository + ?Sized>(
    repo: &R,
    post_id: PostId,
) -> RepositoryResult<Option<Post>> {
    let post = repo.increment_views(post_id).await?;
    if let Some(ref p) = post {
        debug!("post {} now has {} views", post_id, p.views);
    }
    Ok(post)
}

/// Delete a post and its comments.
pub async fn delete_post<R: FullRepository + ?Sized>(
    repo: &R,
    post_id: PostId,
) -> RepositoryResult<bool> {
    let deleted = repo.delete_post(post_id).await?;
    if deleted {
        info!("deleted post {} and its comments", post_id);
    }
    Ok(deleted)
}

// ==================== Comments ====================

/// Attach a comment to an existing post.
pub async fn add_comment<R: FullRepository + ?Sized>(
    repo: &R,
    post_id: PostId,
    comment: NewComment,
) -> RepositoryResult<Option<Comment>> {
    let created = repo.add_comment(post_id, comment).await?;
    if let Some(ref c) = created {
        info!("added comment {} to post {}", c.id, post_id);
    }
    Ok(created)
}

/// Delete one comment of a post.
pub async fn delete_comment<R: FullRepository + ?Sized>(
    repo: &R,
    post_id: PostId,
    comment_id: CommentId,
) -> RepositoryResult<bool> {
    let deleted = repo.delete_comment(post_id, comment_id).await?;
    if deleted {
        info!("deleted comment {} of post {}", comment_id, post_id);
    }
    Ok(deleted)
}
