//! Public base URL derivation from the incoming request.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};
use serde_json::json;

/// Builds `http://{host}` for the request.
///
/// The `Host` header wins; HTTP/2 requests that only carry `:authority` fall
/// back to the authority of the request URI. The port is kept, since short
/// links must point back at the exact listener that served the request.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if neither source yields a host, or the
/// `Host` header is not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// assert_eq!(
///     base_url_from_request(&headers, &Uri::from_static("/api/urls")).unwrap(),
///     "http://localhost:3000"
/// );
/// ```
pub fn base_url_from_request(headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
            .trim(),
        None => uri.authority().map(|a| a.as_str()).unwrap_or_default(),
    };

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header", json!({})));
    }

    Ok(format!("http://{host}"))
}

/// Joins a base URL and a short code into a full short URL.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, Uri, header};

    #[test]
    fn test_base_url_with_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        assert_eq!(
            base_url_from_request(&headers, &Uri::from_static("/api/urls")).unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_base_url_ipv6() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("[::1]:8080"));

        assert_eq!(
            base_url_from_request(&headers, &Uri::from_static("/api/urls")).unwrap(),
            "http://[::1]:8080"
        );
    }

    #[test]
    fn test_missing_host() {
        let headers = HeaderMap::new();
        let err = base_url_from_request(&headers, &Uri::from_static("/api/urls")).unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_base_url_falls_back_to_uri_authority() {
        let headers = HeaderMap::new();
        let uri = Uri::from_static("http://localhost:4000/api/shorten");

        assert_eq!(
            base_url_from_request(&headers, &uri).unwrap(),
            "http://localhost:4000"
        );
    }

    #[test]
    fn test_host_header_wins_over_uri_authority() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("s.example.com"));
        let uri = Uri::from_static("http://127.0.0.1:3000/api/urls");

        assert_eq!(
            base_url_from_request(&headers, &uri).unwrap(),
            "http://s.example.com"
        );
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        assert_eq!(short_url("https://s.example.com/", "abc123"), "https://s.example.com/abc123");
        assert_eq!(short_url("https://s.example.com", "abc123"), "https://s.example.com/abc123");
    }
}
