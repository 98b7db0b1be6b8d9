//! Signed session tokens (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies session tokens.
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_hours: u64,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Token lifetime in seconds, also used as the cookie `Max-Age`.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_hours * 3600
    }

    pub fn issue(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.ttl_hours as i64)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verifies signature and expiry, returning the user id.
    ///
    /// Any failure (bad signature, expired, malformed subject) yields `None`.
    pub fn verify(&self, token: &str) -> Option<i64> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .inspect_err(|e| tracing::debug!(error = %e, "Rejected session token"))
            .ok()?;

        data.claims.sub.parse().ok()
    }
}
