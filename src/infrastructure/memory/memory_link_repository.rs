//! In-memory implementation of the link repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local link store.
///
/// Links are keyed by slug, so slug uniqueness falls out of the map. The
/// entry guard returned by `get_mut` holds the slug's shard lock, which makes
/// the increment-and-read in [`LinkRepository::resolve`] atomic per slug.
///
/// Lock order: never hold a `links` guard while touching `ids`.
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
    ids: DashMap<i64, String>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            ids: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = match self.links.entry(new_link.slug.clone()) {
            Entry::Occupied(_) => return Err(AppError::slug_taken(&new_link.slug)),
            Entry::Vacant(vacant) => {
                let link = Link {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    slug: new_link.slug,
                    original_url: new_link.original_url,
                    domain: new_link.domain,
                    clicks: 0,
                    owner_id: new_link.owner_id,
                    custom_slug: new_link.custom_slug,
                    created_at: Utc::now(),
                };
                vacant.insert(link.clone());
                link
            }
        };

        self.ids.insert(link.id, link.slug.clone());
        Ok(link)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(slug).map(|entry| entry.value().clone()))
    }

    async fn resolve(
        &self,
        slug: &str,
        domain: Option<String>,
    ) -> Result<Option<String>, AppError> {
        let Some(mut entry) = self.links.get_mut(slug) else {
            return Ok(None);
        };

        if let Some(domain) = domain
            && entry.domain.as_deref() != Some(domain.as_str())
        {
            return Ok(None);
        }

        entry.clicks += 1;
        Ok(Some(entry.original_url.clone()))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let Some(slug) = self.ids.get(&id).map(|entry| entry.value().clone()) else {
            return Ok(false);
        };

        let removed = self
            .links
            .remove_if(&slug, |_, link| link.id == id && link.owner_id == owner_id)
            .is_some();

        if removed {
            self.ids.remove(&id);
        }

        Ok(removed)
    }
}
