//! Feedback validation.

use crate::error::CoreError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Maximum length of a feedback comment (characters).
pub const MAX_COMMENT_LENGTH: usize = 2_000;

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

/// Trim a comment, mapping blank input to `None`.
pub fn normalize_comment(comment: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(trimmed) = comment.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let len = trimmed.chars().count();
    if len > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters (got {len})"
        )));
    }
    Ok(Some(trimmed.to_string()))
}
