//! Externally visible URLs for links and redirects.

use crate::{ApiError, ApiResult};

use axum::http::{HeaderMap, header};
use reqwest::Url;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Base URL that unsubscribe links are built on.
///
/// A configured `public_url` wins; otherwise the scheme comes from
/// `X-Forwarded-Proto` (default `http`) and the authority from `Host`.
pub fn resolve_web_root(public_url: Option<&str>, headers: &HeaderMap) -> ApiResult<String> {
    if let Some(url) = public_url.filter(|u| !u.trim().is_empty()) {
        return Ok(url.trim_end_matches('/').to_string());
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| *v == "http" || *v == "https")
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing Host header"))?;

    Ok(format!("{scheme}://{host}"))
}

/// Path of the admin page for `list_name`, percent-encoded for a `Location` header
pub fn display_path(list_name: &str) -> String {
    encoded_path(&["admin", "list", "display", list_name])
}

fn encoded_path(segments: &[&str]) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return format!("/{}", segments.join("/"));
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url.path().to_string()
}
