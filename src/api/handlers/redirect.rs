//! Handlers for redirect resolution.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::dto::resolve::{ResolveQuery, ResolveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug in the global namespace.
///
/// # Endpoint
///
/// `GET /r/{slug}`
///
/// Matches the link whatever its domain. Each successful redirect counts one
/// click.
///
/// # Errors
///
/// Returns 404 Not Found if no link has this slug.
/// Returns 503 Service Unavailable if storage cannot be reached.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.redirect_service.resolve(&slug, None).await?;
    Ok(redirect_to(&url))
}

/// Redirects a slug within a business domain.
///
/// # Endpoint
///
/// `GET /{domain}/{slug}`
///
/// Only links created with exactly this domain match.
///
/// # Errors
///
/// Same as [`redirect_handler`].
pub async fn domain_redirect_handler(
    Path((domain, slug)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.redirect_service.resolve(&slug, Some(&domain)).await?;
    Ok(redirect_to(&url))
}

/// Resolves a slug for a presentation layer that renders its own redirect page.
///
/// # Endpoint
///
/// `GET /api/resolve/{slug}?domain=shop`
///
/// Counts a click exactly like the redirect endpoints.
///
/// # Response
///
/// ```json
/// { "url": "https://example.com/sale" }
/// ```
///
/// `url` is `null` when nothing matches. Storage failures are not folded into
/// `null`: they return 503.
pub async fn resolve_handler(
    Path(slug): Path<String>,
    Query(query): Query<ResolveQuery>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    match state
        .redirect_service
        .resolve(&slug, query.domain.as_deref())
        .await
    {
        Ok(url) => Ok(Json(ResolveResponse { url: Some(url) })),
        Err(AppError::NotFound { .. }) => Ok(Json(ResolveResponse { url: None })),
        Err(e) => Err(e),
    }
}

/// 307 to `url`, uncacheable, without leaking the short link as referrer.
fn redirect_to(url: &str) -> Response {
    let mut response = Redirect::temporary(url).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    response
}
