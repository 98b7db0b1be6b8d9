//! Repository trait for accounts and their domains.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Domain ownership is stored on the user. Uniqueness of a domain across all
/// users is enforced by the implementation at write time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user together with its initial domains.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmailTaken`] if the email is registered
    /// - [`AppError::DomainTaken`] if any initial domain is owned by someone
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists all users, oldest first.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Appends `domain` to the user's domain list.
    ///
    /// # Errors
    ///
    /// - [`AppError::DomainTaken`] if any user (including this one) owns it
    /// - [`AppError::NotFound`] if the user does not exist
    async fn add_domain(&self, user_id: i64, domain: &str) -> Result<User, AppError>;
}
