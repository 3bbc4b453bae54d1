//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository traits
//! suitable for unit testing and local development. Posts and comments live in
//! two `Vec`s owned by the repository value; cloning the repository clones the
//! handle, not the data, so every clone observes the same store.

use async_trait::async_trait;
use log::{debug, warn};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{Comment, CommentId, NewComment, NewPost, Post, PostChanges, PostId};

/// In-memory local repository.
///
/// Ids come from per-entity counters starting at 1 and are never reused.
/// Lookups are linear scans; lists keep insertion order.
///
/// # Example
/// ```
/// use blog_api::db::repositories::LocalRepository;
/// use blog_api::db::PostRepository;
/// use blog_api::models::NewPost;
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = LocalRepository::new();
/// let post = repo.create_post(NewPost::new("Hello", "World")).await.unwrap();
/// assert_eq!(post.views, 0);
/// assert_eq!(repo.list_posts().await.unwrap().len(), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    posts: Vec<StoredPost>,
    comments: Vec<Comment>,

    // ID counters
    next_post_id: i64,
    next_comment_id: i64,

    // Connection health
    is_healthy: bool,
}

/// Post row without its comments; comments are joined on read.
#[derive(Clone)]
struct StoredPost {
    id: PostId,
    title: String,
    content: String,
    views: i64,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            comments: Vec::new(),
            next_post_id: 1,
            next_comment_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn find_post(&self, post_id: PostId) -> Option<&StoredPost> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    fn find_post_mut(&mut self, post_id: PostId) -> Option<&mut StoredPost> {
        self.posts.iter_mut().find(|p| p.id == post_id)
    }

    fn comments_for(&self, post_id: PostId) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    fn materialize(&self, stored: &StoredPost) -> Post {
        Post {
            id: stored.id,
            title: stored.title.clone(),
            content: stored.content.clone(),
            views: stored.views,
            comments: self.comments_for(stored.id),
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy, every operation other than `health_check` fails with
    /// a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository and reset the id counters.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of posts stored.
    pub fn post_count(&self) -> usize {
        self.data.read().posts.len()
    }

    /// Get the number of comments stored, across all posts.
    pub fn comment_count(&self) -> usize {
        self.data.read().comments.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            warn!("local repository unavailable during {}", operation);
            return Err(
                RepositoryError::connection("Database is not healthy").with_operation(operation)
            );
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_posts(&self) -> RepositoryResult<Vec<Post>> {
        self.check_health("list_posts")?;
        let data = self.data.read();
        Ok(data.posts.iter().map(|p| data.materialize(p)).collect())
    }

    async fn get_post(&self, post_id: PostId) -> RepositoryResult<Option<Post>> {
        self.check_health("get_post")?;
        let data = self.data.read();
        debug!("local lookup for post {}", post_id);
        Ok(data.find_post(post_id).map(|p| data.materialize(p)))
    }

    async fn create_post(&self, post: NewPost) -> RepositoryResult<Post> {
        self.check_health("create_post")?;
        let mut data = self.data.write();
        let id = PostId::new(data.next_post_id);
        data.next_post_id += 1;

        let stored = StoredPost {
            id,
            title: post.title,
            content: post.content,
            views: 0,
        };
        let created = data.materialize(&stored);
        data.posts.push(stored);
        Ok(created)
    }

    async fn update_post(
        &self,
        post_id: PostId,
        changes: PostChanges,
    ) -> RepositoryResult<Option<Post>> {
        self.check_health("update_post")?;
        let mut data = self.data.write();
        let Some(stored) = data.find_post_mut(post_id) else {
            return Ok(None);
        };
        stored.title = changes.title;
        stored.content = changes.content;
        let stored = stored.clone();
        Ok(Some(data.materialize(&stored)))
    }

    async fn increment_views(&self, post_id: PostId) -> RepositoryResult<Option<Post>> {
        self.check_health("increment_views")?;
        let mut data = self.data.write();
        let Some(stored) = data.find_post_mut(post_id) else {
            return Ok(None);
        };
        stored.views = stored.views.checked_add(1).ok_or_else(|| {
            RepositoryError::internal("View counter overflow")
                .with_operation("increment_views")
                .with_entity("post", post_id)
        })?;
        let stored = stored.clone();
        Ok(Some(data.materialize(&stored)))
    }

    async fn delete_post(&self, post_id: PostId) -> RepositoryResult<bool> {
        self.check_health("delete_post")?;
        let mut data = self.data.write();
        let before = data.posts.len();
        data.posts.retain(|p| p.id != post_id);
        if data.posts.len() == before {
            return Ok(false);
        }
        data.comments.retain(|c| c.post_id != post_id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for LocalRepository {
    async fn list_comments_for_post(&self, post_id: PostId) -> RepositoryResult<Vec<Comment>> {
        self.check_health("list_comments_for_post")?;
        Ok(self.data.read().comments_for(post_id))
    }

    async fn get_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> RepositoryResult<Option<Comment>> {
        self.check_health("get_comment")?;
        Ok(self
            .data
            .read()
            .comments
            .iter()
            .find(|c| c.post_id == post_id && c.id == comment_id)
            .cloned())
    }

    async fn add_comment(
        &self,
        post_id: PostId,
        comment: NewComment,
    ) -> RepositoryResult<Option<Comment>> {
        self.check_health("add_comment")?;
        let mut data = self.data.write();
        if data.find_post(post_id).is_none() {
            return Ok(None);
        }

        let id = CommentId::new(data.next_comment_id);
        data.next_comment_id += 1;
        let created = Comment {
            id,
            post_id,
            content: comment.content,
        };
        data.comments.push(created.clone());
        Ok(Some(created))
    }

    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> RepositoryResult<bool> {
        self.check_health("delete_comment")?;
        let mut data = self.data.write();
        let before = data.comments.len();
        data.comments
            .retain(|c| !(c.post_id == post_id && c.id == comment_id));
        Ok(data.comments.len() != before)
    }
}
