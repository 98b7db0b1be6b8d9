//! DTOs for domain management.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddDomainRequest {
    pub domain: String,
}

/// The caller's domains in the order they were added.
#[derive(Debug, Serialize)]
pub struct DomainListResponse {
    pub items: Vec<String>,
}
