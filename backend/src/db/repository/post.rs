//! Post repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewPost, Post, PostChanges, PostId};

/// Repository trait for post operations.
///
/// Lookups never fail for a missing id: they return `None` (or `false` for
/// deletes) and leave the "not found" decision to the caller. Every returned
/// [`Post`] carries its comments.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List every post with its comments.
    ///
    /// Ordering is backend-specific: the in-memory store keeps insertion order,
    /// the relational store returns the most recent id first.
    async fn list_posts(&self) -> RepositoryResult<Vec<Post>>;

    /// Fetch one post with its comments, or `None` if the id is absent.
    async fn get_post(&self, post_id: PostId) -> RepositoryResult<Option<Post>>;

    /// Insert a new post. The store assigns the id and starts `views` at 0.
    ///
    /// # Returns
    /// * `Ok(Post)` - The fully materialized record
    /// * `Err(RepositoryError)` - If the write fails
    async fn create_post(&self, post: NewPost) -> RepositoryResult<Post>;

    /// Replace the title and content of an existing post.
    ///
    /// `views` and comments are left untouched. Returns `None` if the id is absent.
    async fn update_post(
        &self,
        post_id: PostId,
        changes: PostChanges,
    ) -> RepositoryResult<Option<Post>>;

    /// Add exactly one to the post's view counter and return the updated post.
    async fn increment_views(&self, post_id: PostId) -> RepositoryResult<Option<Post>>;

    /// Delete a post and every comment attached to it.
    ///
    /// # Returns
    /// * `Ok(true)` - The post existed and was removed
    /// * `Ok(false)` - No post with that id
    async fn delete_post(&self, post_id: PostId) -> RepositoryResult<bool>;
}
