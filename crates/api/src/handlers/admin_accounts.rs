//! Handlers for back-office accounts under `/admin/admins`.
//!
//! Only a `super_admin` may list or create admins.

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::roles::AdminRole;
use scidraft_db::models::admin_user::{AdminUserResponse, CreateAdminUser};
use scidraft_db::repositories::AdminUserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::rbac::RequireSuperAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/admins`.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// GET /api/admin/admins
pub async fn list_admins(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> AppResult<Json<DataResponse<Vec<AdminUserResponse>>>> {
    let admins = AdminUserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(
        admins.into_iter().map(AdminUserResponse::from).collect(),
    )))
}

/// POST /api/admin/admins
pub async fn create_admin(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Json(input): Json<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AdminUserResponse>>)> {
    let email = input.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".into()));
    }
    let role: AdminRole = input.role.parse()?;
    validate_password_strength(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = AdminUserRepo::create(
        &state.pool,
        &CreateAdminUser {
            email,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(
        admin = %admin.email,
        new_admin = %created.email,
        role = %role,
        "Admin account created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(created.into()))))
}
