//! Student access-token validation.
//!
//! Students sign in with the managed identity provider, which issues
//! HS256-signed JWTs with a shared secret. The API only validates them:
//! signature, `exp`, audience, and a 30-minute session window measured
//! from `iat`.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use scidraft_core::types::UserId;
use serde::{Deserialize, Serialize};

/// Role claim the identity provider puts on signed-in users.
pub const ROLE_AUTHENTICATED: &str = "authenticated";

/// Claims carried by a student access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the identity provider's user id.
    pub sub: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

fn default_role() -> String {
    ROLE_AUTHENTICATED.to_string()
}

/// Configuration for access-token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Tokens issued longer ago than this are rejected even if `exp` has
    /// not passed.
    pub session_window_secs: i64,
}

const DEFAULT_AUDIENCE: &str = "authenticated";
const DEFAULT_SESSION_WINDOW_SECS: i64 = 30 * 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default         |
    /// |----------------------------|----------|-----------------|
    /// | `JWT_SECRET`               | **yes**  | --              |
    /// | `JWT_AUDIENCE`             | no       | `authenticated` |
    /// | `USER_SESSION_WINDOW_SECS` | no       | `1800`          |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        let session_window_secs: i64 = std::env::var("USER_SESSION_WINDOW_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_WINDOW_SECS.to_string())
            .parse()
            .expect("USER_SESSION_WINDOW_SECS must be a valid i64");

        Self {
            secret,
            audience,
            session_window_secs,
        }
    }
}

/// Why a bearer token was refused.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad signature, wrong audience, expired, or malformed.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// Valid token, but issued before the session window.
    #[error("session window elapsed")]
    SessionExpired,
}

/// Validate a bearer token and return its claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?
    .claims;

    if Utc::now().timestamp() - claims.iat > config.session_window_secs {
        return Err(TokenError::SessionExpired);
    }
    Ok(claims)
}

/// Sign a token the way the identity provider does, issued at `iat`.
///
/// The API never hands these out; it exists for tooling and tests.
pub fn issue_token(
    user_id: UserId,
    email: Option<&str>,
    iat: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        email: email.map(str::to_string),
        role: ROLE_AUTHENTICATED.to_string(),
        aud: config.audience.clone(),
        exp: iat + config.session_window_secs,
        iat,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
