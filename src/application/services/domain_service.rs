//! Domain ownership service.

use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::domain_name::validate_domain_name;
use serde_json::json;
use std::sync::Arc;

/// Service for claiming and listing a user's domains.
///
/// A domain is owned by at most one user; the repository enforces this at
/// write time.
pub struct DomainService<U: UserRepository + ?Sized> {
    users: Arc<U>,
}

impl<U: UserRepository + ?Sized> DomainService<U> {
    /// Creates a new domain service.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Claims `domain` for the user and returns their updated domain list.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the name is invalid or reserved
    /// - [`AppError::DomainTaken`] if any user, the caller included, owns it
    pub async fn add_domain(&self, user_id: i64, domain: &str) -> Result<Vec<String>, AppError> {
        let domain = validate_domain_name(domain)?;

        let user = self.users.add_domain(user_id, &domain).await?;
        tracing::info!(user_id, domain = %domain, "Domain added");

        Ok(user.domains)
    }

    /// Returns the user's domains in the order they were added.
    pub async fn list_domains(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| user.domains)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))
    }
}
