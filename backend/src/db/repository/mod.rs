//! Repository trait definitions for post and comment persistence.
//!
//! The persistence capabilities are split across two focused traits so that
//! each backend implementation stays readable:
//!
//! - [`post`]: post CRUD plus the view counter
//! - [`comment`]: comments scoped to a parent post
//! - [`error`]: error types shared by both
//!
//! # Convenience Trait Bound
//!
//! The router and the service layer work against [`FullRepository`]:
//!
//! ```ignore
//! async fn publish<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let post = repo.create_post(NewPost::new("Hello", "World")).await?;
//!     repo.add_comment(post.id, NewComment::new("First!")).await?;
//!     Ok(())
//! }
//! ```

pub mod comment;
pub mod error;
pub mod post;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use comment::CommentRepository;
pub use post::PostRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing both traits.
pub trait FullRepository: PostRepository + CommentRepository {}

impl<T> FullRepository for T where T: PostRepository + CommentRepository {}
