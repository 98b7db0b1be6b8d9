//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};

const LINK_COLUMNS: &str =
    "id, slug, original_url, domain, clicks, owner_id, custom_slug, created_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    slug: String,
    original_url: String,
    domain: Option<String>,
    clicks: i64,
    owner_id: i64,
    custom_slug: bool,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            original_url: row.original_url,
            domain: row.domain,
            clicks: row.clicks,
            owner_id: row.owner_id,
            custom_slug: row.custom_slug,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for the link registry.
///
/// Uses bound parameters for every value. Slug uniqueness is the
/// `links_slug_key` unique index.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (slug, original_url, domain, owner_id, custom_slug)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.slug)
        .bind(&new_link.original_url)
        .bind(&new_link.domain)
        .bind(new_link.owner_id)
        .bind(new_link.custom_slug)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match map_sqlx_error(e) {
            AppError::SlugTaken { .. } => AppError::slug_taken(&new_link.slug),
            other => other,
        })?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn resolve(
        &self,
        slug: &str,
        domain: Option<String>,
    ) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE slug = $1 AND ($2::text IS NULL OR domain = $2)
            RETURNING original_url
            "#,
        )
        .bind(slug)
        .bind(domain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
