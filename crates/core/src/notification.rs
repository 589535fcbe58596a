//! Notification type constants and validation.

use crate::error::CoreError;

pub const TYPE_INFO: &str = "info";
pub const TYPE_PAYMENT: &str = "payment";
pub const TYPE_REPORT: &str = "report";
pub const TYPE_SYSTEM: &str = "system";

pub const VALID_TYPES: &[&str] = &[TYPE_INFO, TYPE_PAYMENT, TYPE_REPORT, TYPE_SYSTEM];

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_MESSAGE_LENGTH: usize = 2_000;

pub fn validate_type(kind: &str) -> Result<(), CoreError> {
    if VALID_TYPES.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid notification type '{kind}'. Must be one of: {VALID_TYPES:?}"
        )))
    }
}

/// Validate an admin-authored notification.
pub fn validate_notification(kind: &str, title: &str, message: &str) -> Result<(), CoreError> {
    validate_type(kind)?;
    if title.trim().is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be 1 to {MAX_TITLE_LENGTH} characters"
        )));
    }
    if message.trim().is_empty() || message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message must be 1 to {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}
