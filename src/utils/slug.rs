//! Slug generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Length of generated slugs.
pub const GENERATED_SLUG_LENGTH: usize = 6;

/// Maximum length of a user-supplied slug.
pub const MAX_CUSTOM_SLUG_LENGTH: usize = 64;

/// URL-safe alphabet used for generated slugs.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generates a random 6-character slug over `A-Za-z0-9_-`.
///
/// Collisions are possible and are detected by the store's unique index;
/// callers retry with a fresh slug.
pub fn generate_slug() -> String {
    let mut rng = rand::rng();
    (0..GENERATED_SLUG_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-supplied slug.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, hyphens
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > MAX_CUSTOM_SLUG_LENGTH {
        return Err(AppError::bad_request(
            "Custom slug must be 1-64 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AppError::bad_request(
            "Custom slug can only contain letters, numbers, and hyphens",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
