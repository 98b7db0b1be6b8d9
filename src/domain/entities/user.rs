//! User entity: an account that owns links and domains.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// Every entry of `domains` is owned by exactly one user across the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string. Never serialized.
    pub password_hash: String,
    pub domains: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn owns_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub domains: Vec<String>,
}
