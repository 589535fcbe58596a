//! Admin session cookie validation and `Set-Cookie` builders.
//!
//! The token format lives in `scidraft_core::admin_session`; this module
//! deals with the HTTP side: finding the cookie among request headers,
//! deciding whether the session is still valid, and rendering the cookie
//! strings the middleware and login handlers send back.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use scidraft_core::admin_session::{
    decode_session, encode_session, AdminSession, ADMIN_SESSION_COOKIE,
    DEFAULT_ADMIN_SESSION_TIMEOUT_SECS,
};
use scidraft_core::types::Timestamp;

pub const ERR_NO_SESSION: &str = "No admin session";
pub const ERR_INVALID_SESSION: &str = "Invalid admin session";
pub const ERR_SESSION_EXPIRED: &str = "Admin session expired";

/// `Set-Cookie` value that removes the admin session from the browser.
pub const CLEAR_ADMIN_COOKIE: &str = "admin-session=; Path=/; Max-Age=0; \
     Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Strict";

/// Configuration for admin session cookies.
#[derive(Clone)]
pub struct AdminSessionConfig {
    /// HMAC key for signing cookie payloads.
    pub secret: String,
    /// Inactivity window in seconds.
    pub timeout_secs: i64,
    /// Add the `Secure` attribute (HTTPS deployments).
    pub secure_cookie: bool,
}

impl std::fmt::Debug for AdminSessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSessionConfig")
            .field("secret", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

impl AdminSessionConfig {
    /// Load admin session configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `ADMIN_SESSION_SECRET`       | **yes**  | --      |
    /// | `ADMIN_SESSION_TIMEOUT_SECS` | no       | `120`   |
    /// | `ADMIN_COOKIE_SECURE`        | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `ADMIN_SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("ADMIN_SESSION_SECRET")
            .expect("ADMIN_SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "ADMIN_SESSION_SECRET must not be empty");

        let timeout_secs: i64 = std::env::var("ADMIN_SESSION_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_ADMIN_SESSION_TIMEOUT_SECS.to_string())
            .parse()
            .expect("ADMIN_SESSION_TIMEOUT_SECS must be a valid i64");

        let secure_cookie: bool = std::env::var("ADMIN_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("ADMIN_COOKIE_SECURE must be `true` or `false`");

        Self {
            secret,
            timeout_secs,
            secure_cookie,
        }
    }
}

/// Outcome of checking a request's admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCheck {
    pub is_valid: bool,
    pub error: Option<&'static str>,
    pub admin: Option<AdminSession>,
    /// The browser should be told to drop its cookie.
    pub clear_cookie: bool,
}

impl SessionCheck {
    fn valid(admin: AdminSession) -> Self {
        Self {
            is_valid: true,
            error: None,
            admin: Some(admin),
            clear_cookie: false,
        }
    }

    fn invalid(error: &'static str, clear_cookie: bool) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
            admin: None,
            clear_cookie,
        }
    }
}

/// Find a cookie by name across all `Cookie` headers.
pub fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Validate the admin session cookie value (if any) at `now`.
pub fn validate_admin_session(
    cookie: Option<&str>,
    now: Timestamp,
    config: &AdminSessionConfig,
) -> SessionCheck {
    let Some(token) = cookie.filter(|value| !value.is_empty()) else {
        return SessionCheck::invalid(ERR_NO_SESSION, false);
    };

    let session = match decode_session(token, config.secret.as_bytes()) {
        Ok(session) => session,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected admin session cookie");
            return SessionCheck::invalid(ERR_INVALID_SESSION, true);
        }
    };

    if session.is_expired(now, config.timeout_secs) {
        return SessionCheck::invalid(ERR_SESSION_EXPIRED, true);
    }
    SessionCheck::valid(session)
}

/// Validate the admin session carried by a request's headers.
pub fn check_request(headers: &HeaderMap, now: Timestamp, config: &AdminSessionConfig) -> SessionCheck {
    validate_admin_session(find_cookie(headers, ADMIN_SESSION_COOKIE), now, config)
}

/// `Set-Cookie` value carrying a signed session.
pub fn session_cookie(session: &AdminSession, config: &AdminSessionConfig) -> String {
    let token = encode_session(session, config.secret.as_bytes());
    let mut cookie = format!(
        "{ADMIN_SESSION_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
        config.timeout_secs
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}
