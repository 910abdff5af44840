//! HTTP Basic authentication middleware for Axum

use crate::di::ServiceContainer;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;

const REALM: &str = "Basic realm=\"release-proxy\"";

/// Username and password from an `Authorization: Basic` header
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse an `Authorization` header value
    ///
    /// Returns `None` for any other scheme, bad base64, non UTF-8 content or
    /// a missing `:` separator. The password may itself contain `:`.
    pub fn parse(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Compare against the configured pair
    ///
    /// An empty username never matches.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let password_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        !self.username.is_empty() && username_ok && password_ok
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Axum middleware to require the configured basic-auth credentials
pub async fn require_basic_auth(
    State(container): State<ServiceContainer>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(BasicCredentials::parse)
        .is_some_and(|c| {
            c.matches(
                &container.config.auth_username,
                &container.config.auth_password,
            )
        });

    if !authorized {
        tracing::debug!(path = %request.uri().path(), "Rejected request without valid credentials");
        return unauthorized();
    }

    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM))],
        "Unauthorized",
    )
        .into_response()
}
