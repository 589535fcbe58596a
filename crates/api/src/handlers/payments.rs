//! Handlers for the student's `/payments` resource.
//!
//! Payments are recorded as `pending`; confirmation happens in the
//! back-office (see `admin_payments`).

use axum::extract::State;
use axum::http::StatusCode;
use scidraft_core::payment::{normalize_phone, validate_amount};
use scidraft_db::models::payment::{CreatePayment, Payment};
use scidraft_db::repositories::PaymentRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/payments
pub async fn create_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<DataResponse<Payment>>)> {
    validate_amount(input.amount)?;
    let phone = normalize_phone(&input.phone)?;

    let account = user.ensure_account(&state.pool).await?;
    let payment = PaymentRepo::create(&state.pool, account.id, input.amount, &phone).await?;

    tracing::info!(
        payment_id = payment.id,
        user_id = %account.id,
        amount = payment.amount,
        "Payment created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(payment))))
}

/// GET /api/payments
pub async fn list_my_payments(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let payments = PaymentRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(payments)))
}
