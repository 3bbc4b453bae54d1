//! Database module for post and comment storage.
//!
//! This module provides abstractions for persistence via the Repository
//! pattern, allowing the storage backend to be swapped without touching the
//! HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! │  - PostRepository / CommentRepository                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼───────────────────┐  ┌─────────▼───────────────┐
//! │ Postgres Repository   │  │ Local Repository        │
//! │ (Diesel, durable)     │  │ (in-memory, ephemeral)  │
//! └───────────────────────┘  └─────────────────────────┘
//! ```
//!
//! There is no process-wide repository instance: the binary builds one with
//! [`RepositoryFactory`] and hands it to the router state.

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    CommentRepository, ErrorContext, FullRepository, PostRepository, RepositoryError,
    RepositoryResult,
};
