//! Subscription plans and report-generation gating.

use crate::error::CoreError;

pub const PLAN_FREE: &str = "free";
pub const PLAN_PREMIUM: &str = "premium";

pub const VALID_PLANS: &[&str] = &[PLAN_FREE, PLAN_PREMIUM];

/// Reports a free-plan student may hold in `draft` or `completed` state.
pub const FREE_REPORT_LIMIT: i64 = 1;

pub fn validate_plan(plan: &str) -> Result<(), CoreError> {
    if VALID_PLANS.contains(&plan) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid plan '{plan}'. Must be one of: {VALID_PLANS:?}"
        )))
    }
}

/// Check whether a student on `plan` who already holds `generated` reports
/// may generate another one.
pub fn ensure_can_generate(plan: &str, generated: i64) -> Result<(), CoreError> {
    if plan == PLAN_PREMIUM || generated < FREE_REPORT_LIMIT {
        Ok(())
    } else {
        Err(CoreError::PaymentRequired(
            "Upgrade to premium to generate more reports".to_string(),
        ))
    }
}
