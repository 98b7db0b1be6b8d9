//! API route configuration.
//!
//! Routes are split by the protection they need; [`crate::routes`] applies the
//! authentication and rate limiting layers.

use crate::api::handlers::{
    add_domain_handler, create_link_handler, delete_link_handler, list_domains_handler,
    list_links_handler, login_handler, logout_handler, me_handler, register_handler,
    resolve_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Public API routes.
///
/// - `GET /resolve/{slug}?domain=` - Resolve a slug to its destination and count a click
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/resolve/{slug}", get(resolve_handler))
}

/// Account routes. Public, but under the strict rate limit.
///
/// - `POST /auth/register`
/// - `POST /auth/login`
/// - `POST /auth/logout`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
}

/// Routes requiring a session (Bearer token or `auth-token` cookie).
///
/// - `GET    /me`           - Current account
/// - `GET    /links`        - The caller's links
/// - `POST   /links`        - Register a link
/// - `DELETE /links/{id}`   - Delete one of the caller's links
/// - `GET    /domains`      - The caller's domains
/// - `POST   /domains`      - Claim a domain
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{id}", delete(delete_link_handler))
        .route(
            "/domains",
            get(list_domains_handler).post(add_domain_handler),
        )
}
