//! Aggregates for the back-office dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// `(status, count)` pair from a `GROUP BY status` query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Dashboard totals returned by `GET /admin/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub premium_users: i64,
    pub reports_by_status: Vec<StatusCount>,
    pub payments_by_status: Vec<StatusCount>,
    /// Sum of `completed` payment amounts.
    pub revenue: i64,
    pub feedback_count: i64,
    pub average_rating: Option<f64>,
}
