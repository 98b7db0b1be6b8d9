//! Handlers for link management endpoints (list, create, delete).

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkListResponse, LinkResponse};
use crate::api::middleware::CurrentUser;
use crate::application::services::CreateLink;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_links(user.id).await?;

    Ok(Json(LinkListResponse {
        items: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Registers a link for the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/sale",
///   "slug": "promo1",     // optional, generated when omitted
///   "domain": "shop"      // optional, must be one of the caller's domains
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL or slug
/// - 403 if the domain belongs to someone else or nobody
/// - 409 if the slug is taken under any domain
/// - 503 if no free slug could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(CreateLink {
            original_url: payload.url,
            requested_slug: payload.slug,
            domain: payload.domain,
            owner_id: user.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Permanently deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist or is not the caller's.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
