use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{PostError, PostResult},
        models::{NewPost, Post},
    },
    ports::repositories::PostRepository,
};

/// Bounded pool size for the record store connection
const MAX_CONNECTIONS: u32 = 10;
/// How long to wait for a connection before declaring the store unavailable
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// SQL-based implementation of PostRepository using PostgreSQL.
///
/// The pool is the repository's explicit connection state: `ping` probes it
/// instead of consulting any process-wide readiness flag.
#[derive(Clone)]
pub struct SqlPostRepository {
    pool: PgPool,
}

impl SqlPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the store with bounded pool size and timeouts
    pub async fn connect(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(CONNECT_TIMEOUT)
            .connect(connection_string)
            .await?;

        Ok(Self::new(pool))
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id UUID PRIMARY KEY,
                name VARCHAR NOT NULL,
                prompt TEXT NOT NULL,
                photo TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    fn map_read_error(e: sqlx::Error) -> PostError {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                PostError::StoreUnavailable {
                    message: e.to_string(),
                }
            }
            e => PostError::FetchFailed {
                message: e.to_string(),
            },
        }
    }

    fn map_write_error(e: sqlx::Error) -> PostError {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                PostError::StoreUnavailable {
                    message: e.to_string(),
                }
            }
            e => PostError::PersistFailed {
                message: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn insert(&self, post: &NewPost) -> PostResult<Post> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO posts (id, name, prompt, photo, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(post.name())
        .bind(post.prompt())
        .bind(post.photo())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(Self::map_write_error)?;

        Ok(Post {
            id,
            name: post.name().to_string(),
            prompt: post.prompt().to_string(),
            photo: post.photo().to_string(),
            created_at,
        })
    }

    async fn list(&self) -> PostResult<Vec<Post>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, prompt, photo, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::map_read_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Post {
                id: row.get("id"),
                name: row.get("name"),
                prompt: row.get("prompt"),
                photo: row.get("photo"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn ping(&self) -> PostResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| PostError::StoreUnavailable {
                message: e.to_string(),
            })
    }
}
