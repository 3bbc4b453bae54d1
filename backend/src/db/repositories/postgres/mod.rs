//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic migration execution on construction
//! - Foreign key from `comments.post_id` to `posts.id` with `ON DELETE CASCADE`
//! - Every write runs in its own transaction; a failure rolls it back
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info};
use std::collections::HashMap;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    CommentRepository, ErrorContext, PostRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Comment, CommentId, NewComment, NewPost, Post, PostChanges, PostId};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
    /// - `PG_POOL_MAX`: Maximum pool size (default: 10)
    /// - `PG_POOL_MIN`: Minimum pool size (default: 1)
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.max_pool_size);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.min_pool_size);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.connection_timeout_sec);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.idle_timeout_sec);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        info!(
            "postgres repository ready (pool max={}, min={})",
            config.max_pool_size, config.min_pool_size
        );
        Ok(Self { pool })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    ///
    /// The operation runs exactly once; any error is tagged with `operation`
    /// and returned to the caller.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection"),
                )
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
        .map_err(|e| e.with_operation(operation))
    }
}

fn load_comments(conn: &mut PgConnection, post_id: i64) -> RepositoryResult<Vec<Comment>> {
    let rows = comments::table
        .filter(comments::post_id.eq(post_id))
        .order(comments::id.asc())
        .select(CommentRow::as_select())
        .load::<CommentRow>(conn)?;
    Ok(rows.into_iter().map(Comment::from).collect())
}

fn load_post(conn: &mut PgConnection, post_id: i64) -> RepositoryResult<Option<Post>> {
    let row = posts::table
        .find(post_id)
        .select(PostRow::as_select())
        .first::<PostRow>(conn)
        .optional()?;

    match row {
        Some(row) => {
            let comments = load_comments(conn, row.id)?;
            Ok(Some(row.into_post(comments)))
        }
        None => Ok(None),
    }
}

fn group_comments(rows: Vec<CommentRow>) -> HashMap<i64, Vec<Comment>> {
    let mut grouped: HashMap<i64, Vec<Comment>> = HashMap::new();
    for row in rows {
        grouped.entry(row.post_id).or_default().push(row.into());
    }
    grouped
}

#[async_trait]
impl PostRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn list_posts(&self) -> RepositoryResult<Vec<Post>> {
        self.with_conn("list_posts", |conn| {
            let post_rows = posts::table
                .order(posts::id.desc())
                .select(PostRow::as_select())
                .load::<PostRow>(conn)?;

            let ids: Vec<i64> = post_rows.iter().map(|p| p.id).collect();
            let comment_rows = comments::table
                .filter(comments::post_id.eq_any(ids))
                .order(comments::id.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(conn)?;
            let mut grouped = group_comments(comment_rows);

            Ok(post_rows
                .into_iter()
                .map(|row| {
                    let comments = grouped.remove(&row.id).unwrap_or_default();
                    row.into_post(comments)
                })
                .collect())
        })
        .await
    }

    async fn get_post(&self, post_id: PostId) -> RepositoryResult<Option<Post>> {
        debug!("postgres lookup for post {}", post_id);
        self.with_conn("get_post", move |conn| load_post(conn, post_id.value()))
            .await
    }

    async fn create_post(&self, post: NewPost) -> RepositoryResult<Post> {
        self.with_conn("create_post", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let row = diesel::insert_into(posts::table)
                    .values(&NewPostRow {
                        title: &post.title,
                        content: &post.content,
                    })
                    .returning(PostRow::as_returning())
                    .get_result::<PostRow>(tx)?;
                Ok(row.into_post(Vec::new()))
            })
        })
        .await
    }

    async fn update_post(
        &self,
        post_id: PostId,
        changes: PostChanges,
    ) -> RepositoryResult<Option<Post>> {
        self.with_conn("update_post", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let row = diesel::update(posts::table.find(post_id.value()))
                    .set(&PostChangesRow {
                        title: &changes.title,
                        content: &changes.content,
                    })
                    .returning(PostRow::as_returning())
                    .get_result::<PostRow>(tx)
                    .optional()?;

                match row {
                    Some(row) => {
                        let comments = load_comments(tx, row.id)?;
                        Ok(Some(row.into_post(comments)))
                    }
                    None => Ok(None),
                }
            })
        })
        .await
        .map_err(|e| e.with_entity("post", post_id))
    }

    async fn increment_views(&self, post_id: PostId) -> RepositoryResult<Option<Post>> {
        self.with_conn("increment_views", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let row = diesel::update(posts::table.find(post_id.value()))
                    .set(posts::views.eq(posts::views + 1))
                    .returning(PostRow::as_returning())
                    .get_result::<PostRow>(tx)
                    .optional()?;

                match row {
                    Some(row) => {
                        let comments = load_comments(tx, row.id)?;
                        Ok(Some(row.into_post(comments)))
                    }
                    None => Ok(None),
                }
            })
        })
        .await
        .map_err(|e| e.with_entity("post", post_id))
    }

    async fn delete_post(&self, post_id: PostId) -> RepositoryResult<bool> {
        self.with_conn("delete_post", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                // comments go with it via ON DELETE CASCADE
                let deleted = diesel::delete(posts::table.find(post_id.value())).execute(tx)?;
                Ok(deleted > 0)
            })
        })
        .await
        .map_err(|e| e.with_entity("post", post_id))
    }
}

#[async_trait]
impl CommentRepository for PostgresRepository {
    async fn list_comments_for_post(&self, post_id: PostId) -> RepositoryResult<Vec<Comment>> {
        self.with_conn("list_comments_for_post", move |conn| {
            load_comments(conn, post_id.value())
        })
        .await
    }

    async fn get_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> RepositoryResult<Option<Comment>> {
        self.with_conn("get_comment", move |conn| {
            let row = comments::table
                .filter(comments::id.eq(comment_id.value()))
                .filter(comments::post_id.eq(post_id.value()))
                .select(CommentRow::as_select())
                .first::<CommentRow>(conn)
                .optional()?;
            Ok(row.map(Comment::from))
        })
        .await
    }

    async fn add_comment(
        &self,
        post_id: PostId,
        comment: NewComment,
    ) -> RepositoryResult<Option<Comment>> {
        self.with_conn("add_comment", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let parent_exists: bool =
                    diesel::select(diesel::dsl::exists(posts::table.find(post_id.value())))
                        .get_result(tx)?;
                if !parent_exists {
                    return Ok(None);
                }

                let row = diesel::insert_into(comments::table)
                    .values(&NewCommentRow {
                        post_id: post_id.value(),
                        content: &comment.content,
                    })
                    .returning(CommentRow::as_returning())
                    .get_result::<CommentRow>(tx)?;
                Ok(Some(row.into()))
            })
        })
        .await
        .map_err(|e| e.with_entity("post", post_id))
    }

    async fn delete_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> RepositoryResult<bool> {
        self.with_conn("delete_comment", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let deleted = diesel::delete(
                    comments::table
                        .filter(comments::id.eq(comment_id.value()))
                        .filter(comments::post_id.eq(post_id.value())),
                )
                .execute(tx)?;
                Ok(deleted > 0)
            })
        })
        .await
        .map_err(|e| e.with_entity("comment", comment_id))
    }
}
