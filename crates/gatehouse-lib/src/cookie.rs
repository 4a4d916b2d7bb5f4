// ============================
// crates/gatehouse-lib/src/cookie.rs
// ============================
//! Session cookie helpers.
//!
//! The cookie is HTTP-only and path-scoped to the whole application. It is
//! deliberately not marked `Secure`, matching the deployment this system
//! targets; the transport expiry is independent of the registry's own TTL.
use axum::http::HeaderMap;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_token";

/// Build the `Set-Cookie` value that installs a session token.
pub fn session_cookie(token: &str, max_age_secs: u64) -> String {
    format!("{SESSION_COOKIE}={token}; Max-Age={max_age_secs}; Path=/; HttpOnly")
}

/// Build the `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; HttpOnly")
}

/// Extract the session token carried by a request, if any. A missing or
/// malformed cookie header is a normal input, not an error.
pub fn session_token_from(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}
