//! Link registry service: creation, listing and deletion.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use crate::utils::slug::{generate_slug, validate_custom_slug};
use crate::utils::url_validator::validate_url;
use serde_json::json;

/// Input for [`LinkService::create_link`].
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub original_url: String,
    pub requested_slug: Option<String>,
    pub domain: Option<String>,
    pub owner_id: i64,
}

/// Service for registering and managing a user's links.
///
/// Enforces slug validity, domain ownership and global slug uniqueness.
pub struct LinkService<L: LinkRepository + ?Sized, U: UserRepository + ?Sized> {
    links: Arc<L>,
    users: Arc<U>,
    slug_attempts: usize,
}

impl<L: LinkRepository + ?Sized, U: UserRepository + ?Sized> LinkService<L, U> {
    /// Creates a new link service.
    ///
    /// `slug_attempts` bounds how many generated slugs are tried before
    /// giving up with [`AppError::SlugGenerationExhausted`].
    pub fn new(links: Arc<L>, users: Arc<U>, slug_attempts: usize) -> Self {
        Self {
            links,
            users,
            slug_attempts: slug_attempts.max(1),
        }
    }

    /// Registers a link and returns it.
    ///
    /// An empty or blank `domain` means no domain scope. An empty requested
    /// slug means "generate one".
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a malformed URL or custom slug
    /// - [`AppError::SlugTaken`] if the requested slug exists under any domain
    /// - [`AppError::DomainNotOwned`] if `domain` is not one of the owner's
    /// - [`AppError::SlugGenerationExhausted`] if every generated slug collided
    pub async fn create_link(&self, input: CreateLink) -> Result<Link, AppError> {
        let original_url = validate_url(&input.original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let requested_slug = input
            .requested_slug
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let domain = input
            .domain
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if let Some(slug) = &requested_slug {
            validate_custom_slug(slug)?;

            if self.links.find_by_slug(slug).await?.is_some() {
                return Err(AppError::slug_taken(slug));
            }
        }

        if let Some(domain) = &domain {
            let owner = self.users.find_by_id(input.owner_id).await?.ok_or_else(|| {
                AppError::unauthenticated("User not found", json!({ "user_id": input.owner_id }))
            })?;

            if !owner.owns_domain(domain) {
                return Err(AppError::domain_not_owned(domain));
            }
        }

        let link = match requested_slug {
            Some(slug) => {
                self.links
                    .create(NewLink {
                        slug,
                        original_url,
                        domain,
                        owner_id: input.owner_id,
                        custom_slug: true,
                    })
                    .await?
            }
            None => {
                self.create_with_generated_slug(original_url, domain, input.owner_id)
                    .await?
            }
        };

        tracing::info!(
            link_id = link.id,
            slug = %link.slug,
            domain = link.domain.as_deref().unwrap_or(""),
            owner_id = link.owner_id,
            "Link created"
        );

        Ok(link)
    }

    /// Inserts with a fresh random slug, regenerating on uniqueness violations.
    async fn create_with_generated_slug(
        &self,
        original_url: String,
        domain: Option<String>,
        owner_id: i64,
    ) -> Result<Link, AppError> {
        for attempt in 1..=self.slug_attempts {
            let new_link = NewLink {
                slug: generate_slug(),
                original_url: original_url.clone(),
                domain: domain.clone(),
                owner_id,
                custom_slug: false,
            };

            match self.links.create(new_link).await {
                Err(AppError::SlugTaken { details, .. }) => {
                    tracing::debug!(attempt, %details, "Generated slug collided, retrying");
                }
                result => return result,
            }
        }

        Err(AppError::slug_generation_exhausted(self.slug_attempts))
    }

    /// Lists the owner's links, most recently created first.
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.links.list_by_owner(owner_id).await
    }

    /// Permanently deletes a link owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist or belongs to
    /// someone else; the two cases are indistinguishable to the caller.
    pub async fn delete_link(&self, link_id: i64, owner_id: i64) -> Result<(), AppError> {
        if !self.links.delete(link_id, owner_id).await? {
            return Err(AppError::not_found(
                "Link not found or you don't have permission",
                json!({ "id": link_id }),
            ));
        }

        tracing::info!(link_id, owner_id, "Link deleted");
        Ok(())
    }
}
