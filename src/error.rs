//! Application error taxonomy and its HTTP representation.
//!
//! Every service and repository returns [`AppError`]. Errors are recovered at the
//! HTTP boundary and rendered as:
//!
//! ```json
//! { "error": { "code": "slug_taken", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload embedded in every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Unauthenticated { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    SlugTaken { message: String, details: Value },

    #[error("{message}")]
    DomainTaken { message: String, details: Value },

    #[error("{message}")]
    DomainNotOwned { message: String, details: Value },

    #[error("{message}")]
    EmailTaken { message: String, details: Value },

    #[error("{message}")]
    SlugGenerationExhausted { message: String, details: Value },

    /// The store could not be reached.
    ///
    /// `retryable` is set only when the operation provably never reached the
    /// store (e.g. the pool timed out handing out a connection), so repeating
    /// it cannot apply a mutation twice.
    #[error("{message}")]
    StorageUnavailable {
        message: String,
        details: Value,
        retryable: bool,
    },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthenticated(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthenticated {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn slug_taken(slug: &str) -> Self {
        Self::SlugTaken {
            message: "This custom link is already taken".to_string(),
            details: json!({ "slug": slug }),
        }
    }

    pub fn domain_taken(domain: &str) -> Self {
        Self::DomainTaken {
            message: "Domain already in use".to_string(),
            details: json!({ "domain": domain }),
        }
    }

    pub fn domain_not_owned(domain: &str) -> Self {
        Self::DomainNotOwned {
            message: "You don't have access to this domain".to_string(),
            details: json!({ "domain": domain }),
        }
    }

    pub fn email_taken(email: &str) -> Self {
        Self::EmailTaken {
            message: "Email already in use".to_string(),
            details: json!({ "email": email }),
        }
    }

    pub fn slug_generation_exhausted(attempts: usize) -> Self {
        Self::SlugGenerationExhausted {
            message: "Failed to generate a unique slug".to_string(),
            details: json!({ "attempts": attempts }),
        }
    }

    pub fn storage_unavailable(message: impl Into<String>, retryable: bool) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            details: json!({}),
            retryable,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true if repeating the failed operation is safe and may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable {
                retryable: true,
                ..
            }
        )
    }

    /// Stable error code used in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Unauthenticated { .. } => "unauthenticated",
            Self::NotFound { .. } => "not_found",
            Self::SlugTaken { .. } => "slug_taken",
            Self::DomainTaken { .. } => "domain_taken",
            Self::DomainNotOwned { .. } => "domain_not_owned",
            Self::EmailTaken { .. } => "email_taken",
            Self::SlugGenerationExhausted { .. } => "slug_generation_exhausted",
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::DomainNotOwned { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::SlugTaken { .. } | Self::DomainTaken { .. } | Self::EmailTaken { .. } => {
                StatusCode::CONFLICT
            }
            Self::SlugGenerationExhausted { .. } | Self::StorageUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::Unauthenticated { message, details }
            | Self::NotFound { message, details }
            | Self::SlugTaken { message, details }
            | Self::DomainTaken { message, details }
            | Self::DomainNotOwned { message, details }
            | Self::EmailTaken { message, details }
            | Self::SlugGenerationExhausted { message, details }
            | Self::StorageUnavailable {
                message, details, ..
            }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Internal { .. } => tracing::error!(error = %self, "Request failed"),
            Self::StorageUnavailable { .. } | Self::SlugGenerationExhausted { .. } => {
                tracing::warn!(error = %self, "Request failed")
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

/// Maps SQLx errors onto the application taxonomy.
///
/// Unique violations are translated by constraint name; connection-level
/// failures become [`AppError::StorageUnavailable`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return match db.constraint() {
            Some("links_slug_key") => AppError::SlugTaken {
                message: "This custom link is already taken".to_string(),
                details: json!({}),
            },
            Some("users_email_key") => AppError::EmailTaken {
                message: "Email already in use".to_string(),
                details: json!({}),
            },
            constraint => AppError::internal(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            ),
        };
    }

    match e {
        sqlx::Error::PoolTimedOut => {
            AppError::storage_unavailable("Timed out waiting for a database connection", true)
        }
        sqlx::Error::PoolClosed => {
            AppError::storage_unavailable("Database connection pool is closed", false)
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::WorkerCrashed => {
            AppError::storage_unavailable("Database is unreachable", false)
        }
        other => {
            tracing::error!(error = %other, "Database error");
            AppError::internal("Database error", json!({}))
        }
    }
}
