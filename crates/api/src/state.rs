use std::sync::Arc;

use scidraft_ai::ReportGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scidraft_db::DbPool,
    /// Server configuration (token secrets, cookie settings, timeouts).
    pub config: Arc<ServerConfig>,
    /// Report generator; the AI client in production, a stub in tests.
    pub generator: Arc<dyn ReportGenerator>,
}
