//! DTOs for the resolve endpoint consumed by the presentation layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub domain: Option<String>,
}

/// `url` is `null` when no link matches.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub url: Option<String>,
}
