//! Handler for the back-office dashboard counters.

use axum::extract::State;
use scidraft_db::models::stats::DashboardStats;
use scidraft_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::rbac::RequireModerator;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn dashboard(
    State(state): State<AppState>,
    RequireModerator(_admin): RequireModerator,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = StatsRepo::dashboard(&state.pool).await?;
    Ok(Json(DataResponse::new(stats)))
}
