//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthChecks, HealthResponse, StorageCheck};
use crate::state::AppState;

/// Reports whether the storage backend answers.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: storage reachable
/// - **503 Service Unavailable**: storage unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "backend": "postgres" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.storage.backend_name();

    let storage = match state.storage.ping().await {
        Ok(()) => StorageCheck {
            status: "ok",
            backend,
            error: None,
        },
        Err(e) => {
            tracing::warn!(backend, error = %e, "Health check failed");
            StorageCheck {
                status: "error",
                backend,
                error: Some(e.to_string()),
            }
        }
    };

    let (code, status) = if storage.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { storage },
        }),
    )
}
