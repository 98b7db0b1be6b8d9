//! DTOs for the health check endpoint.

use serde::Serialize;

/// Overall service health plus the storage check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: StorageCheck,
}

/// Result of pinging the storage backend.
#[derive(Debug, Serialize)]
pub struct StorageCheck {
    /// `ok` or `error`.
    pub status: &'static str,
    /// `postgres` or `memory`.
    pub backend: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StorageCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
