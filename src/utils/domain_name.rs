//! Validation of business domain names.
//!
//! A domain is a short business name used verbatim as the first path segment
//! of a redirect URL (`/{domain}/{slug}`). It is matched exactly, case included.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

const MAX_DOMAIN_LENGTH: usize = 63;

/// Path segments already routed by the service.
const RESERVED_DOMAINS: &[&str] = &["api", "r", "health"];

static DOMAIN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid domain regex"));

/// Trims and validates a domain name, returning the trimmed value.
///
/// # Rules
///
/// - Length: 1-63 characters after trimming
/// - Allowed characters: ASCII letters, digits, `.`, `_`, `-`
/// - Not a reserved segment (`api`, `r`, `health`)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_domain_name(domain: &str) -> Result<String, AppError> {
    let domain = domain.trim();

    if domain.is_empty() || domain.len() > MAX_DOMAIN_LENGTH {
        return Err(AppError::bad_request(
            "Domain must be 1-63 characters",
            json!({ "provided_length": domain.len() }),
        ));
    }

    if !DOMAIN_CHARS.is_match(domain) {
        return Err(AppError::bad_request(
            "Domain can only contain letters, numbers, dots, underscores, and hyphens",
            json!({ "domain": domain }),
        ));
    }

    // "." and ".." are rewritten by clients as path segments.
    if RESERVED_DOMAINS.contains(&domain) || domain.chars().all(|c| c == '.') {
        return Err(AppError::bad_request(
            "This domain is reserved",
            json!({ "domain": domain }),
        ));
    }

    Ok(domain.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domains() {
        assert_eq!(validate_domain_name("mybusiness").unwrap(), "mybusiness");
        assert_eq!(validate_domain_name(" shop.eu ").unwrap(), "shop.eu");
        assert_eq!(validate_domain_name("My_Shop-2").unwrap(), "My_Shop-2");
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert!(validate_domain_name("").is_err());
        assert!(validate_domain_name("   ").is_err());
    }

    #[test]
    fn test_rejects_path_characters() {
        assert!(validate_domain_name("a/b").is_err());
        assert!(validate_domain_name("a b").is_err());
        assert!(validate_domain_name("shop?x").is_err());
    }

    #[test]
    fn test_rejects_too_long() {
        assert!(validate_domain_name(&"d".repeat(64)).is_err());
        assert!(validate_domain_name(&"d".repeat(63)).is_ok());
    }

    #[test]
    fn test_rejects_reserved_segments() {
        for &reserved in RESERVED_DOMAINS {
            assert!(
                validate_domain_name(reserved).is_err(),
                "'{reserved}' should be reserved"
            );
        }
        assert!(validate_domain_name(".").is_err());
        assert!(validate_domain_name("..").is_err());
    }
}
