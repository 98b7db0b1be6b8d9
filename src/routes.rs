//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`             - Health check (public)
//! - `GET  /r/{slug}`           - Redirect in the global namespace (public)
//! - `GET  /{domain}/{slug}`    - Redirect within a business domain (public)
//! - `GET  /api/resolve/{slug}` - Resolve without redirecting (public)
//! - `/api/auth/*`              - Register, login, logout (strict rate limit)
//! - `/api/*`                   - Everything else (session required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token or `auth-token` cookie
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{domain_redirect_handler, health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds all routes and middleware except path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// Static segments (`/health`, `/r/...`, `/api/...`) take precedence over the
/// `/{domain}/{slug}` capture, which is why those names cannot be claimed as
/// domains.
pub fn app_routes(state: AppState, behind_proxy: bool) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::layer(behind_proxy));

    let account = api::routes::auth_routes().layer(rate_limit::secure_layer(behind_proxy));

    let api_router = Router::new()
        .merge(api::routes::public_routes())
        .merge(account)
        .merge(protected);

    Router::new()
        .route("/health", get(health_handler))
        .route("/r/{slug}", get(redirect_handler))
        .route("/{domain}/{slug}", get(domain_redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with trailing slashes trimmed.
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state, behind_proxy))
}
