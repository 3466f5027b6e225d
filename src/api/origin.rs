//! Same-origin check for API calls
//!
//! The UI is served by this process, so API calls coming from a browser
//! must carry an origin on the loopback interface at the served port.

use axum::extract::{Request, State};
use axum::http::header::{ORIGIN, REFERER};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use reqwest::Url;

use super::ApiError;

pub fn is_api_route(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

pub fn is_allowed_origin(origin: &str, port: u16) -> bool {
    [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        format!("http://[::1]:{port}"),
    ]
    .iter()
    .any(|allowed| allowed == origin)
}

/// The declared origin: `Origin`, or failing that the scheme and authority
/// of `Referer`. A `Referer` that is present but malformed still yields an
/// origin, which no allowed origin can match.
pub fn request_origin(headers: &HeaderMap) -> Option<String> {
    if let Some(origin) = headers.get(ORIGIN).and_then(|v| v.to_str().ok()) {
        if !origin.is_empty() {
            return Some(origin.to_owned());
        }
    }

    let referer = headers.get(REFERER)?;
    if referer.is_empty() {
        return None;
    }
    let Ok(referer) = referer.to_str() else {
        return Some(String::from_utf8_lossy(referer.as_bytes()).into_owned());
    };
    Some(referer_origin(referer).unwrap_or_else(|| referer.to_owned()))
}

/// `scheme://host[:port]` of a URL, with host and port kept as written
/// (default ports are not dropped).
fn referer_origin(referer: &str) -> Option<String> {
    let url = Url::parse(referer).ok()?;
    let rest = referer
        .get(url.scheme().len()..)?
        .strip_prefix("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    if host.is_empty() {
        return None;
    }
    Some(format!("{}://{}", url.scheme(), host))
}

/// Middleware rejecting API calls from foreign origins with 403. Calls that
/// declare no origin at all (curl, scripts) are let through.
pub async fn origin_guard(State(port): State<u16>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if !is_api_route(path) {
        return next.run(req).await;
    }

    match request_origin(req.headers()) {
        None => {
            tracing::warn!(path, method = %req.method(), "No Origin or Referer header found");
            next.run(req).await
        }
        Some(origin) if is_allowed_origin(&origin, port) => next.run(req).await,
        Some(origin) => {
            tracing::error!(
                origin = %origin,
                path,
                method = %req.method(),
                "Origin validation failed"
            );
            ApiError::forbidden("Forbidden: Invalid origin").into_response()
        }
    }
}
