//! URL normalization applied before allocation.
//!
//! The allocator compares targets by exact string equality, so every caller
//! must pass input through [`normalize_url`] first.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Normalizes user input into a storable target URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Input without a `scheme://` prefix gets `https://` prepended
/// 3. An explicit scheme must be `http` or `https` (any case)
/// 4. The result must parse as an absolute URL with a host
///
/// The returned string is the trimmed, prefixed input itself rather than the
/// parser's re-serialization, so `example.org` becomes `https://example.org`
/// without a trailing slash.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] for blank input,
/// [`UrlNormalizationError::UnsupportedProtocol`] for other schemes and
/// [`UrlNormalizationError::InvalidFormat`] when parsing fails.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.org").unwrap(), "https://example.org");
/// assert_eq!(normalize_url(" http://a.com/x ").unwrap(), "http://a.com/x");
/// assert!(normalize_url("ftp://a.com").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let candidate = match trimmed.split_once("://") {
        Some((scheme, _)) if is_scheme(scheme) => {
            if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
                return Err(UrlNormalizationError::UnsupportedProtocol);
            }
            trimmed.to_string()
        }
        _ => format!("https://{trimmed}"),
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::InvalidFormat(
            "URL has no host".to_string(),
        ));
    }

    Ok(candidate)
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`.
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
