//! Destination URL validation.
//!
//! Only absolute `http`/`https` URLs are accepted. Reachability is never checked.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Parses and validates a destination URL, returning its serialized form.
///
/// The input is trimmed and parsed; the host is lowercased by the parser.
/// Path, query and fragment are preserved.
///
/// # Errors
///
/// Returns an error for empty input, relative or malformed URLs, URLs without
/// a host, and any scheme other than `http`/`https`.
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        assert_eq!(
            validate_url("https://example.com/sale").unwrap(),
            "https://example.com/sale"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_url("  http://example.com/a?b=1  ").unwrap(),
            "http://example.com/a?b=1"
        );
    }

    #[test]
    fn test_keeps_fragment_and_query() {
        assert_eq!(
            validate_url("https://example.com/page?key=value#section").unwrap(),
            "https://example.com/page?key=value#section"
        );
    }

    #[test]
    fn test_lowercases_host() {
        assert_eq!(
            validate_url("https://EXAMPLE.com/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(validate_url("   "), Err(UrlValidationError::Empty)));
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_url("example.com/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_protocols() {
        for input in [
            "javascript:alert(1)",
            "data:text/plain,hi",
            "file:///etc/passwd",
            "ftp://example.com/file",
            "mailto:a@example.com",
        ] {
            assert!(
                matches!(
                    validate_url(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }
}
