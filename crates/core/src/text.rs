//! Manual and results text normalization.
//!
//! Text pasted from PDFs and word processors arrives with carriage returns,
//! tab runs and long blank stretches. Everything stored in `manual_sessions`
//! goes through [`normalize_text`] first so length checks and prompts see
//! the same canonical form.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum number of characters a normalized manual must contain.
pub const MIN_MANUAL_TEXT_LENGTH: usize = 10;

/// Maximum number of characters accepted for an uploaded manual.
pub const MAX_MANUAL_TEXT_LENGTH: usize = 200_000;

/// Maximum number of characters accepted for experimental results.
pub const MAX_RESULTS_TEXT_LENGTH: usize = 50_000;

/// Horizontal whitespace: space, tab, vertical tab, form feed, NBSP.
static HORIZONTAL_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C\x{A0}]+").expect("valid regex"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Canonicalize free text.
///
/// Strips `\r`, collapses horizontal whitespace runs to a single space,
/// trims every line, keeps at most one blank line between paragraphs and
/// trims the result. Applying it twice yields the same output as once.
pub fn normalize_text(input: &str) -> String {
    let without_cr = input.replace('\r', "");
    let collapsed = HORIZONTAL_SPACE_RE.replace_all(&without_cr, " ");
    let trimmed_lines = collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_RUN_RE
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}

/// Number of characters (not bytes) in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Whether normalized `text` is long enough to be treated as a manual.
pub fn has_minimum_content(text: &str) -> bool {
    char_len(text) >= MIN_MANUAL_TEXT_LENGTH
}

/// Normalize an uploaded manual and enforce the length bounds.
///
/// `empty_message` is the caller-facing error used when the text is too
/// short, since template imports and uploads word it differently.
pub fn normalize_manual_text(input: &str, empty_message: &str) -> Result<String, CoreError> {
    let normalized = normalize_text(input);
    if !has_minimum_content(&normalized) {
        return Err(CoreError::Validation(empty_message.to_string()));
    }
    let len = char_len(&normalized);
    if len > MAX_MANUAL_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Manual text exceeds maximum length of {MAX_MANUAL_TEXT_LENGTH} characters (got {len})"
        )));
    }
    Ok(normalized)
}

/// Normalize experimental results and enforce the length bounds.
pub fn normalize_results_text(input: &str) -> Result<String, CoreError> {
    let normalized = normalize_text(input);
    if normalized.is_empty() {
        return Err(CoreError::Validation(
            "Experimental results must not be empty".to_string(),
        ));
    }
    let len = char_len(&normalized);
    if len > MAX_RESULTS_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Results exceed maximum length of {MAX_RESULTS_TEXT_LENGTH} characters (got {len})"
        )));
    }
    Ok(normalized)
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
