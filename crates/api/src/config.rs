use scidraft_ai::AiConfig;

use crate::auth::admin_cookie::AdminSessionConfig;
use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Secrets are required; everything else has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`; report generation is slow).
    pub request_timeout_secs: u64,
    /// Student bearer-token validation.
    pub jwt: JwtConfig,
    /// Back-office session cookie.
    pub admin_session: AdminSessionConfig,
    /// Generative-AI provider.
    pub ai: AiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                      |
    ///
    /// See [`JwtConfig::from_env`], [`AdminSessionConfig::from_env`] and
    /// [`AiConfig::from_env`] for the remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            admin_session: AdminSessionConfig::from_env(),
            ai: AiConfig::from_env(),
        }
    }
}
