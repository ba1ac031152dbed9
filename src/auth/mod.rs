//! Password-gate session module.
//!
//! One shared operator secret, compared in constant time. On a match an
//! opaque session token is minted (timestamp + server secret, base64) and set
//! as an httpOnly cookie. Protected routes only check that the cookie is
//! present; the value is deliberately not verified. This is a low-assurance
//! perimeter for an internal tool, not a security boundary.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use cookie::{Cookie, SameSite};
use subtle::ConstantTimeEq;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "auth_token";

/// Cookie lifetime: one week.
const COOKIE_MAX_AGE: cookie::time::Duration = cookie::time::Duration::weeks(1);

/// Session-gate layer. Public paths pass through; everything else requires
/// the session cookie to be present, or is redirected to the login route.
/// With no password configured the gate is disabled entirely (dev mode).
pub async fn session_gate_layer(enabled: bool, request: Request, next: Next) -> Response {
    if !enabled || is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    if session_token(request.headers()).is_some() {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}

/// Classify a request path. Public: the auth endpoint, the apply-by-token
/// flow, the coordinator send-links utility, the login page and health check.
pub fn is_public_path(path: &str) -> bool {
    path == "/health"
        || path == "/login"
        || path.starts_with("/api/auth")
        || path.starts_with("/api/apply")
        || path.starts_with("/api/send-links")
}

/// Extract the session token from the request's cookies, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .into_iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value.to_owned()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
}

/// Perform constant-time comparison against the configured secret.
pub fn verify_password(candidate: &str, expected: &str) -> bool {
    candidate.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Mint an opaque session token: current millis concatenated with the server
/// secret, base64-encoded. Reversible, carries no integrity guarantee.
pub fn mint_token(secret: &str) -> String {
    let raw = format!("{}{}", chrono::Utc::now().timestamp_millis(), secret);
    BASE64.encode(raw)
}

/// Build the Set-Cookie value for a freshly minted session token.
pub fn session_cookie(token: &str) -> String {
    Cookie::build((AUTH_COOKIE, token.to_owned()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(COOKIE_MAX_AGE)
        .build()
        .to_string()
}
