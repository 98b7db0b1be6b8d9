//! Storage handle owning the selected backend.
//!
//! Constructed once by the composition root ([`crate::server::run`] or the
//! admin CLI), handed to services as repository trait objects, and closed on
//! shutdown.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use crate::infrastructure::memory::{MemoryLinkRepository, MemoryUserRepository};
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

/// Handle to the link and user stores.
#[derive(Clone)]
pub struct Storage {
    links: Arc<dyn LinkRepository>,
    users: Arc<dyn UserRepository>,
    pool: Option<Arc<PgPool>>,
}

impl Storage {
    /// Opens the backend selected by `config`.
    ///
    /// For PostgreSQL this builds the connection pool and applies pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or a migration fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres backend")?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                    .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                    .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                    .connect(url)
                    .await
                    .context("Failed to connect to database")?;
                tracing::info!("Connected to database");

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to apply migrations")?;
                tracing::info!("Migrations applied");

                Ok(Self::postgres(pool))
            }
        }
    }

    /// Wraps an existing pool. Migrations are the caller's concern.
    pub fn postgres(pool: PgPool) -> Self {
        let pool = Arc::new(pool);
        Self {
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Creates an empty process-local store.
    pub fn in_memory() -> Self {
        Self {
            links: Arc::new(MemoryLinkRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            pool: None,
        }
    }

    pub fn links(&self) -> Arc<dyn LinkRepository> {
        self.links.clone()
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    /// Human-readable backend name for logs and health output.
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Checks that the backend can serve queries.
    pub async fn ping(&self) -> Result<(), AppError> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool.as_ref()).await?;
        }
        Ok(())
    }

    /// Closes the connection pool, waiting for checked-out connections.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_ping() {
        let storage = Storage::in_memory();
        assert!(storage.ping().await.is_ok());
        assert_eq!(storage.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_in_memory_handles_share_state() {
        let storage = Storage::in_memory();
        let clone = storage.clone();

        let user = storage
            .users()
            .create(crate::domain::entities::NewUser {
                name: "A".to_string(),
                email: "a@example.com".to_string(),
                password_hash: "x".to_string(),
                domains: vec![],
            })
            .await
            .unwrap();

        assert!(clone.users().find_by_id(user.id).await.unwrap().is_some());
    }
}
