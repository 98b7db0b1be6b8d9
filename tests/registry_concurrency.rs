//! Concurrency properties of the link registry on the in-memory backend.

use std::sync::Arc;

use outlink::application::services::{CreateLink, LinkService, RedirectService};
use outlink::domain::entities::NewUser;
use outlink::domain::repositories::{LinkRepository, UserRepository};
use outlink::error::AppError;
use outlink::infrastructure::Storage;

async fn seed_user(storage: &Storage, email: &str, domains: &[&str]) -> i64 {
    storage
        .users()
        .create(NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "unused".to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
        })
        .await
        .unwrap()
        .id
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_every_click() {
    let storage = Storage::in_memory();
    let owner = seed_user(&storage, "ann@example.com", &["shop"]).await;
    let links = LinkService::new(storage.links(), storage.users(), 5);
    let redirect = Arc::new(RedirectService::new(storage.links(), 3));

    links
        .create_link(CreateLink {
            original_url: "https://example.com".to_string(),
            requested_slug: Some("hot".to_string()),
            domain: Some("shop".to_string()),
            owner_id: owner,
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..100 {
        let redirect = redirect.clone();
        handles.push(tokio::spawn(async move {
            let domain = if i % 2 == 0 { Some("shop") } else { None };
            redirect.resolve("hot", domain).await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "https://example.com");
    }

    let link = storage.links().find_by_slug("hot").await.unwrap().unwrap();
    assert_eq!(link.clicks, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_same_slug_one_wins() {
    let storage = Storage::in_memory();
    let links = Arc::new(LinkService::new(storage.links(), storage.users(), 5));

    let mut owners = Vec::new();
    for i in 0..10 {
        owners.push(seed_user(&storage, &format!("user{i}@example.com"), &[]).await);
    }

    let mut handles = Vec::new();
    for owner in owners {
        let links = links.clone();
        handles.push(tokio::spawn(async move {
            links
                .create_link(CreateLink {
                    original_url: format!("https://example.com/{owner}"),
                    requested_slug: Some("contested".to_string()),
                    domain: None,
                    owner_id: owner,
                })
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::SlugTaken { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_miss_does_not_mutate() {
    let storage = Storage::in_memory();
    let owner = seed_user(&storage, "ann@example.com", &["shop"]).await;
    let links = LinkService::new(storage.links(), storage.users(), 5);
    let redirect = RedirectService::new(storage.links(), 3);

    links
        .create_link(CreateLink {
            original_url: "https://example.com".to_string(),
            requested_slug: Some("scoped".to_string()),
            domain: Some("shop".to_string()),
            owner_id: owner,
        })
        .await
        .unwrap();

    let err = redirect.resolve("scoped", Some("other")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let link = storage.links().find_by_slug("scoped").await.unwrap().unwrap();
    assert_eq!(link.clicks, 0);
}
