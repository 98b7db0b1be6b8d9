//! Session authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::entities::User, error::AppError, state::AppState};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth-token";

/// The authenticated user, inserted as a request extension by [`layer`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticates requests using the session token.
///
/// # Token Sources
///
/// 1. `Authorization: Bearer <token>`
/// 2. `Cookie: auth-token=<token>`
///
/// On success the user is available to handlers as
/// `Extension<CurrentUser>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if no token
/// is present, the token is invalid or expired, or its user no longer exists.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/links", get(list_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = session_token(&mut parts).await.ok_or_else(|| {
        AppError::unauthenticated(
            "Unauthorized",
            serde_json::json!({"reason": "Session token is missing"}),
        )
    })?;

    let user = st.auth_service.current_user(&token).await?.ok_or_else(|| {
        AppError::unauthenticated(
            "Unauthorized",
            serde_json::json!({"reason": "Session is invalid or expired"}),
        )
    })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

async fn session_token(parts: &mut Parts) -> Option<String> {
    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(parts, &()).await {
        return Some(token);
    }
    cookie_token(&parts.headers)
}

/// Extracts the session cookie from the `Cookie` header(s).
fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// Builds the `Set-Cookie` value for a fresh session.
pub fn session_cookie(token: &str, max_age_seconds: u64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
