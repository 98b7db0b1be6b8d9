//! Handlers for registration, login, logout and the current account.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::api::middleware::CurrentUser;
use crate::api::middleware::auth::{clear_session_cookie, session_cookie};
use crate::application::services::{Registration, Session};
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account and signs it in.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ann",
///   "email": "ann@example.com",
///   "password": "at-least-8",
///   "domain": "mybusiness"    // optional
/// }
/// ```
///
/// Responds `201` with the user and token, and sets the `auth-token` cookie.
///
/// # Errors
///
/// - 400 on validation failure
/// - 409 if the email or domain is already in use
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let session = state
        .auth_service
        .register(Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            domain: payload.domain,
        })
        .await?;

    session_response(&state, StatusCode::CREATED, session)
}

/// Signs in with email and password.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 with the same message for an unknown email and a wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    session_response(&state, StatusCode::OK, session)
}

/// Clears the session cookie.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
///
/// Tokens are stateless; a copied token stays valid until it expires.
pub async fn logout_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let cookie = header_value(&clear_session_cookie(state.cookie_secure))?;
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]).into_response())
}

/// Returns the signed-in account.
///
/// # Endpoint
///
/// `GET /api/me`
pub async fn me_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(user.into())
}

fn session_response(
    state: &AppState,
    status: StatusCode,
    session: Session,
) -> Result<Response, AppError> {
    let cookie = header_value(&session_cookie(
        &session.token,
        state.auth_service.session_ttl_seconds(),
        state.cookie_secure,
    ))?;

    let body = AuthResponse {
        user: session.user.into(),
        token: session.token,
    };

    Ok((status, [(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|e| {
        AppError::internal("Failed to build cookie", json!({ "reason": e.to_string() }))
    })
}
