//! Aggregate queries for the back-office dashboard.

use scidraft_core::payment::STATUS_COMPLETED;
use scidraft_core::plan::PLAN_PREMIUM;
use sqlx::PgPool;

use crate::models::stats::{DashboardStats, StatusCount};

pub struct StatsRepo;

impl StatsRepo {
    pub async fn dashboard(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let (total_users, premium_users): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE plan = $1) FROM users",
        )
        .bind(PLAN_PREMIUM)
        .fetch_one(pool)
        .await?;

        let reports_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM reports GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        let payments_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM payments GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await?;

        let revenue: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM payments WHERE status = $1",
        )
        .bind(STATUS_COMPLETED)
        .fetch_one(pool)
        .await?;

        let (feedback_count, average_rating): (i64, Option<f64>) =
            sqlx::query_as("SELECT COUNT(*), AVG(rating)::FLOAT8 FROM feedback")
                .fetch_one(pool)
                .await?;

        Ok(DashboardStats {
            total_users,
            premium_users,
            reports_by_status,
            payments_by_status,
            revenue,
            feedback_count,
            average_rating,
        })
    }
}
