//! In-memory implementation of the user repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Default)]
struct UserTable {
    users: Vec<User>,
    next_id: i64,
}

impl UserTable {
    fn domain_owned(&self, domain: &str) -> bool {
        self.users.iter().any(|u| u.owns_domain(domain))
    }
}

/// Process-local user store.
///
/// A single lock guards the table, so the domain uniqueness check and the
/// write that follows cannot interleave with another writer.
#[derive(Default)]
pub struct MemoryUserRepository {
    table: Mutex<UserTable>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut table = self.table.lock().await;

        if table.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::email_taken(&new_user.email));
        }
        if let Some(domain) = new_user.domains.iter().find(|d| table.domain_owned(d)) {
            return Err(AppError::domain_taken(domain));
        }

        table.next_id += 1;
        let user = User {
            id: table.next_id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            domains: new_user.domains,
            created_at: Utc::now(),
        };
        table.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let table = self.table.lock().await;
        Ok(table.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let table = self.table.lock().await;
        Ok(table.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.table.lock().await.users.clone())
    }

    async fn add_domain(&self, user_id: i64, domain: &str) -> Result<User, AppError> {
        let mut table = self.table.lock().await;

        if table.domain_owned(domain) {
            return Err(AppError::domain_taken(domain));
        }

        let user = table
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))?;

        user.domains.push(domain.to_string());
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, domains: &[&str]) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryUserRepository::new();
        let user = repo.create(new_user("a@example.com", &["shop"])).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(
            repo.find_by_email("a@example.com").await.unwrap().unwrap().id,
            user.id
        );
        assert_eq!(
            repo.find_by_id(user.id).await.unwrap().unwrap().domains,
            vec!["shop"]
        );
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("a@example.com", &[])).await.unwrap();

        let err = repo.create(new_user("a@example.com", &[])).await.unwrap_err();
        assert!(matches!(err, AppError::EmailTaken { .. }));
    }

    #[tokio::test]
    async fn test_initial_domain_taken() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("a@example.com", &["shop"])).await.unwrap();

        let err = repo
            .create(new_user("b@example.com", &["shop"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DomainTaken { .. }));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_domain_unique_across_users() {
        let repo = MemoryUserRepository::new();
        let a = repo.create(new_user("a@example.com", &["shop"])).await.unwrap();
        let b = repo.create(new_user("b@example.com", &[])).await.unwrap();

        let err = repo.add_domain(b.id, "shop").await.unwrap_err();
        assert!(matches!(err, AppError::DomainTaken { .. }));

        let err = repo.add_domain(a.id, "shop").await.unwrap_err();
        assert!(matches!(err, AppError::DomainTaken { .. }));

        let updated = repo.add_domain(b.id, "cafe").await.unwrap();
        assert_eq!(updated.domains, vec!["cafe"]);
    }

    #[tokio::test]
    async fn test_add_domain_unknown_user() {
        let repo = MemoryUserRepository::new();
        let err = repo.add_domain(5, "shop").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
