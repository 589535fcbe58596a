//! Admin session cookie payload and codec.
//!
//! The `admin-session` cookie carries base64 JSON `{email, role, timestamp}`
//! (timestamp in Unix milliseconds) followed by `.` and a base64
//! HMAC-SHA256 signature of the encoded payload:
//!
//! ```text
//! base64url(json) "." base64url(hmac_sha256(secret, base64url(json)))
//! ```
//!
//! HTTP concerns (reading the `Cookie` header, building `Set-Cookie`) live
//! in the API crate; this module only knows the token format and expiry.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::roles::AdminRole;
use crate::types::Timestamp;

type HmacSha256 = Hmac<Sha256>;

/// Cookie name shared with the admin front-end.
pub const ADMIN_SESSION_COOKIE: &str = "admin-session";

/// Admin sessions expire after two minutes without activity.
pub const DEFAULT_ADMIN_SESSION_TIMEOUT_SECS: i64 = 120;

/// Decoded admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub email: String,
    pub role: AdminRole,
    /// Issue time in Unix milliseconds.
    pub timestamp: i64,
}

/// Why a cookie value could not be turned into an [`AdminSession`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionTokenError {
    #[error("session token is not in payload.signature form")]
    Format,
    #[error("session token is not valid base64")]
    Encoding,
    #[error("session token signature mismatch")]
    Signature,
    #[error("session token payload is not a valid admin session")]
    Payload,
}

impl AdminSession {
    pub fn new(email: impl Into<String>, role: AdminRole, now: Timestamp) -> Self {
        Self {
            email: email.into(),
            role,
            timestamp: now.timestamp_millis(),
        }
    }

    /// Milliseconds elapsed since the session was issued.
    pub fn age_ms(&self, now: Timestamp) -> i64 {
        now.timestamp_millis() - self.timestamp
    }

    /// A session is expired once `now - timestamp` exceeds `timeout_secs`.
    pub fn is_expired(&self, now: Timestamp, timeout_secs: i64) -> bool {
        self.age_ms(now) > timeout_secs * 1000
    }

    /// Same identity, re-stamped at `now`.
    pub fn refreshed(&self, now: Timestamp) -> Self {
        Self {
            timestamp: now.timestamp_millis(),
            ..self.clone()
        }
    }
}

fn sign(payload: &str, secret: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    mac
}

/// Serialize and sign a session into a cookie value.
pub fn encode_session(session: &AdminSession, secret: &[u8]) -> String {
    // Serializing a struct of strings and integers cannot fail.
    let json = serde_json::to_vec(session).unwrap_or_default();
    let payload = URL_SAFE_NO_PAD.encode(json);
    let signature = URL_SAFE_NO_PAD.encode(sign(&payload, secret).finalize().into_bytes());
    format!("{payload}.{signature}")
}

/// Verify and decode a cookie value.
pub fn decode_session(token: &str, secret: &[u8]) -> Result<AdminSession, SessionTokenError> {
    let (payload, signature) = token
        .trim()
        .split_once('.')
        .ok_or(SessionTokenError::Format)?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| SessionTokenError::Encoding)?;
    sign(payload, secret)
        .verify_slice(&signature)
        .map_err(|_| SessionTokenError::Signature)?;

    let json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| SessionTokenError::Encoding)?;
    serde_json::from_slice(&json).map_err(|_| SessionTokenError::Payload)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;

    const SECRET: &[u8] = b"admin-session-test-secret";

    fn session_at(now: Timestamp) -> AdminSession {
        AdminSession::new("ops@scidraft.test", AdminRole::Admin, now)
    }

    #[test]
    fn encode_then_decode_returns_same_session() {
        let session = session_at(Utc::now());
        let token = encode_session(&session, SECRET);
        assert_eq!(decode_session(&token, SECRET).unwrap(), session);
    }

    #[test]
    fn payload_is_plain_base64_json() {
        let session = session_at(Utc::now());
        let token = encode_session(&session, SECRET);
        let payload = token.split('.').next().unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(json["email"], "ops@scidraft.test");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["timestamp"], session.timestamp);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode_session(&session_at(Utc::now()), SECRET);
        assert_matches!(
            decode_session(&token, b"another-secret"),
            Err(SessionTokenError::Signature)
        );
    }

    #[test]
    fn tampered_role_is_rejected() {
        let now = Utc::now();
        let token = encode_session(&session_at(now), SECRET);
        let signature = token.split('.').nth(1).unwrap();

        let forged = AdminSession::new("ops@scidraft.test", AdminRole::SuperAdmin, now);
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let forged_token = format!("{forged_payload}.{signature}");

        assert_matches!(
            decode_session(&forged_token, SECRET),
            Err(SessionTokenError::Signature)
        );
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_matches!(decode_session("", SECRET), Err(SessionTokenError::Format));
        assert_matches!(
            decode_session("no-dot-here", SECRET),
            Err(SessionTokenError::Format)
        );
        assert_matches!(
            decode_session("abc.!!!", SECRET),
            Err(SessionTokenError::Encoding)
        );
    }

    #[test]
    fn signed_garbage_payload_is_rejected() {
        let payload = URL_SAFE_NO_PAD.encode(b"{\"email\":1}");
        let signature = URL_SAFE_NO_PAD.encode(sign(&payload, SECRET).finalize().into_bytes());
        assert_matches!(
            decode_session(&format!("{payload}.{signature}"), SECRET),
            Err(SessionTokenError::Payload)
        );
    }

    #[test]
    fn expiry_uses_strict_greater_than() {
        let issued = Utc::now();
        let session = session_at(issued);
        let timeout = DEFAULT_ADMIN_SESSION_TIMEOUT_SECS;

        assert!(!session.is_expired(issued + Duration::seconds(timeout), timeout));
        assert!(session.is_expired(
            issued + Duration::seconds(timeout) + Duration::milliseconds(1),
            timeout
        ));
    }

    #[test]
    fn refreshed_session_restarts_the_window() {
        let issued = Utc::now() - Duration::seconds(100);
        let now = Utc::now();
        let refreshed = session_at(issued).refreshed(now);
        assert_eq!(refreshed.timestamp, now.timestamp_millis());
        assert_eq!(refreshed.role, AdminRole::Admin);
        assert!(!refreshed.is_expired(now + Duration::seconds(60), 120));
    }
}
