//! Payment status constants and request validation.

use crate::error::CoreError;

/// Payment request recorded, awaiting confirmation.
pub const STATUS_PENDING: &str = "pending";
/// Confirmed by the back-office; upgrades the payer's plan.
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";
pub const STATUS_REFUNDED: &str = "refunded";

/// All valid payment statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_COMPLETED,
    STATUS_FAILED,
    STATUS_REFUNDED,
];

/// Smallest accepted amount, in whole currency units.
pub const MIN_AMOUNT: i64 = 1;
/// Largest accepted amount, in whole currency units.
pub const MAX_AMOUNT: i64 = 1_000_000;

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

/// Maximum length of an external payment reference.
pub const MAX_REFERENCE_LENGTH: usize = 100;

/// Returns the statuses `from_status` may move to.
///
/// - `pending`   -> `completed`, `failed`
/// - `failed`    -> `pending` (retry)
/// - `completed` -> `refunded`
/// - `refunded`  -> (terminal)
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_COMPLETED, STATUS_FAILED],
        STATUS_FAILED => &[STATUS_PENDING],
        STATUS_COMPLETED => &[STATUS_REFUNDED],
        _ => &[],
    }
}

pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition payment from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid payment status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

pub fn validate_amount(amount: i64) -> Result<(), CoreError> {
    if (MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Amount must be between {MIN_AMOUNT} and {MAX_AMOUNT}"
        )))
    }
}

/// Reduce a phone number to its digits.
///
/// Accepts an optional leading `+` and space, dash or parenthesis
/// separators. Anything else, or a digit count outside 10..=15, is rejected.
pub fn normalize_phone(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut digits = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '(' | ')' => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Phone number contains invalid character '{c}'"
                )))
            }
        }
    }

    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
        return Err(CoreError::Validation(format!(
            "Phone number must have between {MIN_PHONE_DIGITS} and {MAX_PHONE_DIGITS} digits"
        )));
    }
    Ok(digits)
}

pub fn validate_reference(reference: &str) -> Result<(), CoreError> {
    if reference.trim().is_empty() || reference.len() > MAX_REFERENCE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Payment reference must be 1 to {MAX_REFERENCE_LENGTH} characters"
        )));
    }
    Ok(())
}
