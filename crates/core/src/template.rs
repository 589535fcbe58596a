//! Manual template validation and metadata.

use serde_json::{json, Map, Value};

use crate::error::CoreError;

/// Maximum length of a template id (slug).
pub const MAX_TEMPLATE_ID_LENGTH: usize = 64;

/// Maximum length of a template title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Template ids are lowercase slugs: `[a-z0-9][a-z0-9_-]*`.
pub fn validate_template_id(id: &str) -> Result<(), CoreError> {
    let mut chars = id.chars();
    let valid_first = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let valid_rest =
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if !valid_first || !valid_rest || id.len() > MAX_TEMPLATE_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "Template id must be a lowercase slug of at most {MAX_TEMPLATE_ID_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Template title must be 1 to {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_practical_number(number: Option<i32>) -> Result<(), CoreError> {
    match number {
        Some(n) if n < 1 => Err(CoreError::Validation(
            "Practical number must be positive".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Practical metadata copied onto a manual session imported from a template.
///
/// Template-level `metadata` keys are kept, and the identifying columns
/// override any key of the same name.
pub fn practical_metadata(
    template_id: &str,
    title: &str,
    course_code: Option<&str>,
    practical_number: Option<i32>,
    metadata: &Value,
) -> Value {
    let mut merged = match metadata {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    merged.insert("template_id".into(), json!(template_id));
    merged.insert("title".into(), json!(title));
    merged.insert("course_code".into(), json!(course_code));
    merged.insert("practical_number".into(), json!(practical_number));
    Value::Object(merged)
}
