//! Comment repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Comment, CommentId, NewComment, PostId};

/// Repository trait for comments scoped to a parent post.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// All comments attached to a post, oldest first.
    async fn list_comments_for_post(&self, post_id: PostId) -> RepositoryResult<Vec<Comment>>;

    /// Fetch a comment by id, provided it belongs to `post_id`.
    async fn get_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> RepositoryResult<Option<Comment>>;

    /// Attach a new comment to a post.
    ///
    /// # Returns
    /// * `Ok(Some(Comment))` - The stored comment with its assigned id
    /// * `Ok(None)` - The parent post does not exist; nothing was written
    /// * `Err(RepositoryError)` - If the write fails
    async fn add_comment(
        &self,
        post_id: PostId,
        comment: NewComment,
    ) -> RepositoryResult<Option<Comment>>;

    /// Delete a comment matching both the post id and the comment id.
    ///
    /// Returns `Ok(false)` when no such comment exists.
    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> RepositoryResult<bool>;
}
