//! Redirect resolution with atomic click accounting.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Resolves slugs to destination URLs, counting one click per successful
/// resolution.
///
/// Storage failures are reported as [`AppError::StorageUnavailable`] and never
/// as [`AppError::NotFound`]. Only failures where the store was never reached
/// (see [`AppError::is_retryable`]) are retried, so a retry cannot count a
/// click twice.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    links: Arc<L>,
    retry_attempts: usize,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    /// Creates a new resolver. `retry_attempts` counts the first try.
    pub fn new(links: Arc<L>, retry_attempts: usize) -> Self {
        Self {
            links,
            retry_attempts: retry_attempts.max(1),
        }
    }

    /// Resolves `slug`, optionally restricted to links created for `domain`.
    ///
    /// A blank `domain` is treated as no restriction.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link matches; nothing is mutated
    /// - [`AppError::StorageUnavailable`] if the store could not be reached
    pub async fn resolve(&self, slug: &str, domain: Option<&str>) -> Result<String, AppError> {
        let domain = domain
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(25)
            .max_delay(Duration::from_millis(500))
            .map(jitter)
            .take(self.retry_attempts - 1);

        let resolved = RetryIf::spawn(
            strategy,
            || self.links.resolve(slug, domain.clone()),
            |e: &AppError| {
                let retry = e.is_retryable();
                if retry {
                    tracing::warn!(slug, error = %e, "Resolve failed, retrying");
                }
                retry
            },
        )
        .await?;

        match resolved {
            Some(url) => {
                tracing::debug!(slug, domain = domain.as_deref(), "Resolved");
                Ok(url)
            }
            None => {
                tracing::debug!(slug, domain = domain.as_deref(), "No link matched");
                Err(AppError::not_found(
                    "Link not found",
                    json!({ "slug": slug, "domain": domain }),
                ))
            }
        }
    }
}
