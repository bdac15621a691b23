//! SQLite implementation of the link repository.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::entities::link::format_timestamp;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::codec;
use crate::utils::db_error::is_unique_violation_on_url;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite repository for link storage and retrieval.
///
/// Codes are derived from the row id, so creation is an insert followed by
/// an update inside one transaction. The `url` unique constraint arbitrates
/// concurrent creators.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates the repository and makes sure the `links` table exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the schema cannot be applied.
    pub async fn new(pool: Arc<SqlitePool>) -> Result<Self, AppError> {
        MIGRATOR.run(pool.as_ref()).await?;
        Ok(Self { pool })
    }

    /// Inserts `url`, derives its code from the new id and stores it.
    ///
    /// The transaction rolls back when dropped, so any `?` below leaves no
    /// row behind.
    async fn insert_with_code(&self, url: &str) -> Result<Link, sqlx::Error> {
        let created_at = Utc::now().trunc_subsecs(0);

        let mut tx = self.pool.begin().await?;

        let id = sqlx::query("INSERT INTO links (url, created_at) VALUES (?, ?)")
            .bind(url)
            .bind(format_timestamp(created_at))
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let code = codec::encode(id);

        sqlx::query("UPDATE links SET code = ? WHERE id = ?")
            .bind(&code)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Link::new(id, code, url.to_string(), created_at))
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn create(&self, url: &str) -> Result<Link, AppError> {
        if let Some(existing) = self.find_by_url(url).await? {
            return Ok(existing);
        }

        match self.insert_with_code(url).await {
            Ok(link) => {
                tracing::info!(id = link.id, code = %link.code, "Created short link");
                Ok(link)
            }
            Err(e) if is_unique_violation_on_url(&e) => {
                tracing::debug!("Lost creation race for URL, returning existing link");
                self.find_by_url(url).await?.ok_or_else(|| {
                    AppError::internal(
                        "Database error",
                        "link missing after unique violation on url",
                    )
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, code, url, created_at FROM links WHERE code = ? LIMIT 1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, code, url, created_at FROM links WHERE url = ? LIMIT 1",
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
