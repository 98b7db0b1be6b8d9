//! Account registration, login and session verification.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::security::{SessionTokens, hash_password, verify_password};
use crate::utils::domain_name::validate_domain_name;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Input for [`AuthService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub domain: Option<String>,
}

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Service issuing and verifying session tokens for user accounts.
///
/// Password hashing runs on the blocking pool. Tokens are HS256 JWTs whose
/// subject is the user id; a valid token for a deleted user authenticates
/// nobody.
pub struct AuthService<U: UserRepository + ?Sized> {
    users: Arc<U>,
    tokens: SessionTokens,
}

impl<U: UserRepository + ?Sized> AuthService<U> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository
    /// - `secret` - HMAC key for signing tokens
    /// - `ttl_hours` - session lifetime
    pub fn new(users: Arc<U>, secret: &str, ttl_hours: u64) -> Self {
        Self {
            users,
            tokens: SessionTokens::new(secret, ttl_hours),
        }
    }

    /// Session lifetime in seconds.
    pub fn session_ttl_seconds(&self) -> u64 {
        self.tokens.ttl_seconds()
    }

    /// Creates an account, optionally claiming an initial domain, and signs
    /// the user in.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a blank name, short password or invalid
    ///   domain name
    /// - [`AppError::EmailTaken`] / [`AppError::DomainTaken`] on conflicts
    pub async fn register(&self, registration: Registration) -> Result<Session, AppError> {
        let email = normalize_email(&registration.email);

        if registration.name.trim().is_empty() || email.is_empty() {
            return Err(AppError::bad_request(
                "Name, email and password are required",
                json!({}),
            ));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(
                "Password must be at least 8 characters",
                json!({ "min_length": MIN_PASSWORD_LENGTH }),
            ));
        }

        let domains = match registration.domain.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => vec![validate_domain_name(d)?],
            _ => Vec::new(),
        };

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::email_taken(&email));
        }

        let password_hash = hash_blocking(registration.password).await?;

        let user = self
            .users
            .create(NewUser {
                name: registration.name.trim().to_string(),
                email,
                password_hash,
                domains,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        let token = self.issue(user.id)?;
        Ok(Session { user, token })
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] for an unknown email or a wrong
    /// password, with the same message in both cases.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(invalid_credentials());
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| {
                AppError::internal("Password check failed", json!({ "reason": e.to_string() }))
            })?
            .map_err(|e| {
                tracing::error!(user_id = user.id, error = %e, "Stored password hash is unusable");
                AppError::internal("Password check failed", json!({}))
            })?;

        if !matches {
            tracing::debug!(user_id = user.id, "Login rejected");
            return Err(invalid_credentials());
        }

        let token = self.issue(user.id)?;
        Ok(Session { user, token })
    }

    /// Returns the user a session token belongs to, or `None` if the token is
    /// invalid, expired, or names a user that no longer exists.
    ///
    /// # Errors
    ///
    /// Only storage failures are errors.
    pub async fn current_user(&self, token: &str) -> Result<Option<User>, AppError> {
        let Some(user_id) = self.tokens.verify(token) else {
            return Ok(None);
        };

        self.users.find_by_id(user_id).await
    }

    fn issue(&self, user_id: i64) -> Result<String, AppError> {
        self.tokens.issue(user_id).map_err(|e| {
            AppError::internal("Failed to issue session", json!({ "reason": e.to_string() }))
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::unauthenticated("Invalid email or password", json!({}))
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
        })?;

    hashed.map_err(|e| {
        AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn stored_user(id: i64, password: &str) -> User {
        User {
            id,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password_hash: hash_password(password).unwrap(),
            domains: vec![],
            created_at: Utc::now(),
        }
    }

    fn registration(domain: Option<&str>) -> Registration {
        Registration {
            name: " Ann ".to_string(),
            email: " Ann@Example.com ".to_string(),
            password: "s3cret-pass".to_string(),
            domain: domain.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_issues_token() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "ann@example.com")
            .times(1)
            .returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| {
                u.email == "ann@example.com"
                    && u.name == "Ann"
                    && u.domains == vec!["shop".to_string()]
                    && u.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|u| {
                Ok(User {
                    id: 1,
                    name: u.name,
                    email: u.email,
                    password_hash: u.password_hash,
                    domains: u.domains,
                    created_at: Utc::now(),
                })
            });

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let session = service.register(registration(Some("shop"))).await.unwrap();

        assert_eq!(session.user.id, 1);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "whatever"))));
        users.expect_create().times(0);

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let err = service.register(registration(None)).await.unwrap_err();

        assert!(matches!(err, AppError::EmailTaken { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_reserved_domain() {
        let users = MockUserRepository::new();

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let err = service.register(registration(Some("api"))).await.unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let users = MockUserRepository::new();

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let mut short = registration(None);
        short.password = "1234567".to_string();

        let err = service.register(short).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_success_and_current_user() {
        let mut users = MockUserRepository::new();
        let user = stored_user(7, "right-password");
        let found = user.clone();
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        users
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let session = service
            .login("ANN@example.com", "right-password")
            .await
            .unwrap();

        let current = service.current_user(&session.token).await.unwrap();
        assert_eq!(current.map(|u| u.id), Some(7));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user(7, "right-password"))));

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let err = service.login("ann@example.com", "wrong").await.unwrap_err();

        assert!(matches!(err, AppError::Unauthenticated { .. }));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_message() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(1).returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let err = service.login("nobody@example.com", "x").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_current_user_rejects_bad_token_without_lookup() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        assert!(service.current_user("garbage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_current_user_for_deleted_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(users), SECRET, 1);
        let token = service.issue(99).unwrap();

        assert!(service.current_user(&token).await.unwrap().is_none());
    }
}
