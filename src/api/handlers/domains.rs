//! Handlers for the caller's domains.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::api::dto::domain::{AddDomainRequest, DomainListResponse};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's domains.
///
/// # Endpoint
///
/// `GET /api/domains`
pub async fn list_domains_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<DomainListResponse>, AppError> {
    let items = state.domain_service.list_domains(user.id).await?;
    Ok(Json(DomainListResponse { items }))
}

/// Claims a domain for the caller.
///
/// # Endpoint
///
/// `POST /api/domains` with `{"domain": "mybusiness"}`
///
/// # Errors
///
/// - 400 if the name is invalid or reserved
/// - 409 if any user already owns it
pub async fn add_domain_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<AddDomainRequest>,
) -> Result<(StatusCode, Json<DomainListResponse>), AppError> {
    let items = state
        .domain_service
        .add_domain(user.id, &payload.domain)
        .await?;

    Ok((StatusCode::CREATED, Json(DomainListResponse { items })))
}
