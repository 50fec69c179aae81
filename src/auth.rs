//! HTTP basic authentication for the stats page.
//!
//! A single fixed account is accepted. Anything else gets a `401` with a
//! `WWW-Authenticate` challenge so browsers prompt for credentials.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::{STATS_PASSWORD, STATS_USER};

const CHALLENGE: &str = "Basic realm=\"Authorization Required\"";

/// Middleware rejecting requests without the stats credentials.
pub async fn require_basic_auth(request: Request, next: Next) -> Response {
    if is_authorized(request.headers()) {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "rejected basic auth");
        unauthorized()
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE))],
    )
        .into_response()
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(decode_basic)
        .is_some_and(|(user, password)| {
            let user_ok = constant_time_eq(user.as_bytes(), STATS_USER.as_bytes());
            let password_ok = constant_time_eq(password.as_bytes(), STATS_PASSWORD.as_bytes());
            user_ok & password_ok
        })
}

/// `"Basic dXNlcjpwYXNz"` -> `("user", "pass")`
fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
