//! Report status rules and generated-content validation.
//!
//! A report moves through `pending -> generating -> draft -> completed`,
//! with `failed` reachable from `generating`. Regeneration is allowed from
//! any settled state.

use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Row created, generation not started.
pub const STATUS_PENDING: &str = "pending";
/// An AI request is in flight.
pub const STATUS_GENERATING: &str = "generating";
/// AI content stored, awaiting the student's review.
pub const STATUS_DRAFT: &str = "draft";
/// The student finalized the report.
pub const STATUS_COMPLETED: &str = "completed";
/// The last generation attempt failed.
pub const STATUS_FAILED: &str = "failed";

/// All valid report statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_GENERATING,
    STATUS_DRAFT,
    STATUS_COMPLETED,
    STATUS_FAILED,
];

/// Statuses that count against a plan's report allowance.
pub const BILLABLE_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_COMPLETED];

/// Section keys a generated report may contain, in display order.
pub const SECTION_KEYS: &[&str] = &[
    "aim",
    "introduction",
    "apparatus",
    "theory",
    "procedure",
    "results",
    "discussion",
    "conclusion",
    "references",
];

/// Sections of which at least one must be non-empty.
const REQUIRED_ANY_SECTION: &[&str] = &[
    "aim",
    "introduction",
    "procedure",
    "results",
    "discussion",
    "conclusion",
];

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from_status` may transition to.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_GENERATING],
        STATUS_GENERATING => &[STATUS_DRAFT, STATUS_FAILED],
        STATUS_DRAFT => &[STATUS_GENERATING, STATUS_COMPLETED],
        STATUS_COMPLETED => &[STATUS_GENERATING, STATUS_COMPLETED],
        STATUS_FAILED => &[STATUS_GENERATING],
        _ => &[],
    }
}

/// Validate that a status transition from `current` to `next` is allowed.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = valid_transitions(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition report from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid report status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Whether a report in `status` can be finalized by its owner.
pub fn can_finalize(status: &str) -> bool {
    valid_transitions(status).contains(&STATUS_COMPLETED)
}

// ---------------------------------------------------------------------------
// Generated content
// ---------------------------------------------------------------------------

/// Strip a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse the model's reply into a JSON object and check its shape.
pub fn parse_generated_report(raw: &str) -> Result<Map<String, Value>, CoreError> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body).map_err(|e| {
        CoreError::Validation(format!("Generated report is not valid JSON: {e}"))
    })?;
    let Value::Object(map) = value else {
        return Err(CoreError::Validation(
            "Generated report must be a JSON object".to_string(),
        ));
    };
    validate_report_content(&map)?;
    Ok(map)
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
        _ => false,
    }
}

/// A report needs a title and at least one substantive section.
pub fn validate_report_content(content: &Map<String, Value>) -> Result<(), CoreError> {
    if !is_filled(content.get("title")) {
        return Err(CoreError::Validation(
            "Report content is missing a title".to_string(),
        ));
    }
    if !REQUIRED_ANY_SECTION
        .iter()
        .any(|key| is_filled(content.get(*key)))
    {
        return Err(CoreError::Validation(format!(
            "Report content must include at least one of: {REQUIRED_ANY_SECTION:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_statuses_are_valid() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok(), "Status '{s}' should be valid");
        }
        assert!(validate_status("archived").is_err());
    }

    #[test]
    fn generation_path_is_allowed() {
        assert!(validate_transition(STATUS_PENDING, STATUS_GENERATING).is_ok());
        assert!(validate_transition(STATUS_GENERATING, STATUS_DRAFT).is_ok());
        assert!(validate_transition(STATUS_GENERATING, STATUS_FAILED).is_ok());
        assert!(validate_transition(STATUS_DRAFT, STATUS_COMPLETED).is_ok());
    }

    #[test]
    fn regeneration_is_allowed_from_settled_states() {
        for from in [STATUS_DRAFT, STATUS_COMPLETED, STATUS_FAILED] {
            assert!(validate_transition(from, STATUS_GENERATING).is_ok());
        }
    }

    #[test]
    fn shortcuts_are_rejected() {
        assert!(validate_transition(STATUS_PENDING, STATUS_COMPLETED).is_err());
        assert!(validate_transition(STATUS_FAILED, STATUS_COMPLETED).is_err());
        assert!(validate_transition(STATUS_GENERATING, STATUS_COMPLETED).is_err());
    }

    #[test]
    fn only_draft_and_completed_can_be_finalized() {
        assert!(can_finalize(STATUS_DRAFT));
        assert!(can_finalize(STATUS_COMPLETED));
        assert!(!can_finalize(STATUS_PENDING));
        assert!(!can_finalize(STATUS_GENERATING));
        assert!(!can_finalize(STATUS_FAILED));
    }

    #[test]
    fn parses_plain_json_reply() {
        let raw = r#"{"title": "Simple Pendulum", "aim": "Determine g"}"#;
        let map = parse_generated_report(raw).unwrap();
        assert_eq!(map["title"], "Simple Pendulum");
    }

    #[test]
    fn parses_fenced_json_reply() {
        let raw = "```json\n{\"title\": \"Ohm's Law\", \"results\": [\"V = IR\"]}\n```\n";
        let map = parse_generated_report(raw).unwrap();
        assert_eq!(map["title"], "Ohm's Law");
    }

    #[test]
    fn rejects_non_object_reply() {
        assert!(parse_generated_report("[1, 2, 3]").is_err());
        assert!(parse_generated_report("Here is your report").is_err());
    }

    #[test]
    fn rejects_reply_without_title_or_sections() {
        assert!(parse_generated_report(r#"{"aim": "x"}"#).is_err());
        assert!(parse_generated_report(r#"{"title": "T", "references": ["a"]}"#).is_err());
        assert!(parse_generated_report(r#"{"title": "T", "aim": "   "}"#).is_err());
    }
}
