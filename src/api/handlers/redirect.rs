//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::error;
use url::Url;

use crate::state::AppState;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>404 - URL Not Found</title></head>
<body>
  <h1>404</h1>
  <p>Short URL not found</p>
  <a href="/">Go to Homepage</a>
</body>
</html>"#;

const ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>500 - Server Error</title></head>
<body>
  <h1>500</h1>
  <p>Server error occurred</p>
  <a href="/">Go to Homepage</a>
</body>
</html>"#;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code (malformed codes are plain misses)
/// 2. Persist the updated counter
/// 3. Return 302 Found
///
/// # Errors
///
/// Returns an HTML 404 page for unknown codes and an HTML 500 page for
/// storage failures, including a failed snapshot write after the click. The
/// click stays counted in memory then and the next successful write carries it.
pub async fn redirect_handler(Path(code): Path<String>, State(state): State<AppState>) -> Response {
    let target = match state.link_service.resolve(&code).await {
        Ok(target) => target,
        Err(e) if e.is_not_found() => {
            return (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response();
        }
        Err(e) => {
            error!(code, error = %e, "Failed to resolve short code");
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response();
        }
    };

    if let Err(e) = state.snapshot_service.persist().await {
        error!(code, error = %e, "Click counted but snapshot write failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response();
    }

    // Percent-encode anything the header can't carry verbatim.
    let location = Url::parse(&target)
        .map(String::from)
        .unwrap_or(target);

    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
