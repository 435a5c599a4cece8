//! HTTP basic authentication for the admin routes.

use crate::{ApiError, AppState};

use std::panic::Location;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use error_location::ErrorLocation;
use log::warn;

/// Username and password accepted on `/admin`
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Check a presented pair without short-circuiting on the first mismatch
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        user_ok & pass_ok
    }
}

fn constant_time_eq(expected: &[u8], actual: &[u8]) -> bool {
    let mut diff = expected.len() ^ actual.len();
    for (i, byte) in expected.iter().enumerate() {
        let other = actual.get(i).copied().unwrap_or(0);
        diff |= usize::from(byte ^ other);
    }
    diff == 0
}

/// Extract `(username, password)` from an `Authorization: Basic` header
pub fn parse_basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware rejecting requests without valid admin credentials
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorized = parse_basic_auth(request.headers())
        .map(|(user, pass)| state.admin.verify(&user, &pass))
        .unwrap_or(false);

    if !authorized {
        warn!("Rejected admin request to {}", request.uri().path());
        return ApiError::Unauthorized {
            message: "Admin credentials required".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
        .into_response();
    }

    next.run(request).await
}
