//! DTOs for link management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to register a link.
///
/// Slug and URL rules are enforced by the link service; only sizes are checked
/// here.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Custom slug. Omitted or empty means "generate one".
    pub slug: Option<String>,

    /// One of the caller's domains. Omitted or empty means no domain scope.
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub slug: String,
    pub original_url: String,
    pub domain: Option<String>,
    pub clicks: i64,
    pub custom_slug: bool,
    /// Redirect path, e.g. `/shop/promo1` or `/r/x7Kq_2`.
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            path: link.path(),
            id: link.id,
            slug: link.slug,
            original_url: link.original_url,
            domain: link.domain,
            clicks: link.clicks,
            custom_slug: link.custom_slug,
            created_at: link.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub items: Vec<LinkResponse>,
}
