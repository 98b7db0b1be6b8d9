//! Repository trait for link storage and click accounting.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link registry.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::memory::MemoryLinkRepository`] - process-local
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugTaken`] if any link already uses `new_link.slug`,
    /// regardless of domain. Nothing is written in that case.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by slug without touching its counter.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Increments the click counter of the matching link and returns its
    /// destination, as one atomic operation.
    ///
    /// With `domain: Some(d)` only a link created with exactly that domain
    /// matches; with `None` the slug matches whatever its domain is.
    ///
    /// Returns `Ok(None)` without mutating anything when nothing matches.
    async fn resolve(&self, slug: &str, domain: Option<String>)
    -> Result<Option<String>, AppError>;

    /// Lists the links of one owner, most recently created first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Permanently removes the link if it exists and belongs to `owner_id`.
    ///
    /// Returns `Ok(false)` if no such link exists for that owner.
    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError>;
}
