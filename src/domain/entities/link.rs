//! Link entity representing a short slug mapped to a destination URL.

use chrono::{DateTime, Utc};

/// A registered short link.
///
/// `slug` is unique across all links regardless of `domain`. A link with
/// `domain: None` lives in the global namespace only; a link with a domain is
/// reachable both through that domain and globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub original_url: String,
    pub domain: Option<String>,
    pub clicks: i64,
    pub owner_id: i64,
    /// Whether the slug was chosen by the owner rather than generated.
    pub custom_slug: bool,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Path under which the link redirects, e.g. `/shop/promo1` or `/r/promo1`.
    pub fn path(&self) -> String {
        match &self.domain {
            Some(domain) => format!("/{}/{}", domain, self.slug),
            None => format!("/r/{}", self.slug),
        }
    }
}

/// Input data for registering a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub slug: String,
    pub original_url: String,
    pub domain: Option<String>,
    pub owner_id: i64,
    pub custom_slug: bool,
}
