//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::{AppError, map_sqlx_error};

const USER_COLUMNS: &str = "id, name, email, password_hash, domains, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    domains: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            domains: row.domains,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for user accounts.
///
/// Email uniqueness is the `users_email_key` index. Domain uniqueness has no
/// constraint: writers serialize on a transaction-scoped advisory lock keyed
/// by the domain, then check ownership before writing.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Takes the advisory lock for `domain` and fails if anyone already owns it.
async fn claim_domain(tx: &mut Transaction<'_, Postgres>, domain: &str) -> Result<(), AppError> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(domain)
        .execute(&mut **tx)
        .await?;

    let owned: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE $1 = ANY(domains))")
            .bind(domain)
            .fetch_one(&mut **tx)
            .await?;

    if owned {
        return Err(AppError::domain_taken(domain));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut domains = new_user.domains.clone();
        // Fixed lock order across concurrent registrations.
        domains.sort();
        for domain in &domains {
            claim_domain(&mut tx, domain).await?;
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, domains)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.domains)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match map_sqlx_error(e) {
            AppError::EmailTaken { .. } => AppError::email_taken(&new_user.email),
            other => other,
        })?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn add_domain(&self, user_id: i64, domain: &str) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        claim_domain(&mut tx, domain).await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET domains = array_append(domains, $2)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(domain)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))?;

        tx.commit().await?;
        Ok(row.into())
    }
}
