//! Handlers for payment confirmation under `/admin/payments`.
//!
//! Completing a payment upgrades the payer to the premium plan and sends
//! them a payment notification.

use axum::extract::State;
use scidraft_core::error::CoreError;
use scidraft_core::notification::TYPE_PAYMENT;
use scidraft_core::payment::{
    validate_reference, validate_status, validate_transition, STATUS_COMPLETED,
};
use scidraft_core::plan::PLAN_PREMIUM;
use scidraft_core::search::{Page, PageRequest};
use scidraft_core::types::DbId;
use scidraft_db::models::notification::CreateNotification;
use scidraft_db::models::payment::{Payment, UpdatePaymentStatus};
use scidraft_db::repositories::{NotificationRepo, PaymentRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const PAYMENT_NOT_FOUND: &str = "Payment not found";

/// Query parameters for `GET /admin/payments`.
#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/admin/payments
pub async fn list_payments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaymentQuery>,
) -> AppResult<Json<DataResponse<Page<Payment>>>> {
    let status = params.status.as_deref().map(str::trim).filter(|s| !s.is_empty());
    if let Some(status) = status {
        validate_status(status)?;
    }

    let page = PageRequest::new(params.page, params.limit);
    let items = PaymentRepo::list(&state.pool, status, page.limit, page.offset()).await?;
    let total = PaymentRepo::count(&state.pool, status).await?;
    Ok(Json(DataResponse::new(Page::new(items, total, page))))
}

/// PUT /api/admin/payments/{id}/status
pub async fn update_payment_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentStatus>,
) -> AppResult<Json<DataResponse<Payment>>> {
    let reference = input
        .reference
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    if let Some(reference) = reference {
        validate_reference(reference)?;
    }

    let current = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(PAYMENT_NOT_FOUND.into()))?;
    validate_transition(&current.status, &input.status)?;

    // The status guard turns a concurrent confirmation into a conflict.
    let payment =
        PaymentRepo::update_status(&state.pool, id, &current.status, &input.status, reference)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Conflict(
                    "Payment status changed concurrently; reload and retry".into(),
                ))
            })?;

    tracing::info!(
        admin = %admin.email,
        payment_id = id,
        from = %current.status,
        to = %payment.status,
        "Payment status changed",
    );

    if payment.status == STATUS_COMPLETED {
        UserRepo::set_plan(&state.pool, payment.user_id, PLAN_PREMIUM).await?;
        NotificationRepo::create(
            &state.pool,
            &CreateNotification {
                user_id: Some(payment.user_id),
                kind: TYPE_PAYMENT.to_string(),
                title: "Payment confirmed".to_string(),
                message: "Your payment was confirmed and your account is now premium."
                    .to_string(),
            },
        )
        .await?;
        tracing::info!(user_id = %payment.user_id, payment_id = id, "User upgraded to premium");
    }

    Ok(Json(DataResponse::new(payment)))
}
