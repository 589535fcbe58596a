//! Lab-report prompt assembly.
//!
//! The model receives the practical manual and the student's results and
//! must answer with a single JSON object whose keys are the report
//! sections in [`crate::report::SECTION_KEYS`] plus `title`.

use serde_json::Value;

use crate::report::SECTION_KEYS;
use crate::text::truncate_chars;

/// Manual text beyond this many characters is cut before prompting.
pub const MAX_PROMPT_MANUAL_CHARS: usize = 12_000;

/// Results text beyond this many characters is cut before prompting.
pub const MAX_PROMPT_RESULTS_CHARS: usize = 6_000;

/// Fixed instructions sent as the system message.
pub const SYSTEM_PROMPT: &str = "You are an experienced laboratory demonstrator helping a \
university student write a formal lab report. Write in the past tense and passive voice, \
use SI units, and base every calculation and claim on the supplied manual and results. \
Answer with one JSON object only, no Markdown.";

/// A fully assembled prompt, ready for the AI client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPrompt {
    pub system: String,
    pub user: String,
}

/// Inputs for [`build_report_prompt`].
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub manual_text: &'a str,
    pub results_text: &'a str,
    /// Optional title requested by the student.
    pub title: Option<&'a str>,
    /// Template/practical metadata (course code, practical number, ...).
    pub practical_metadata: &'a Value,
}

fn metadata_lines(metadata: &Value) -> String {
    let Value::Object(fields) = metadata else {
        return String::new();
    };
    fields
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(format!("- {key}: {s}")),
            other => Some(format!("- {key}: {other}")),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the system and user messages for one report.
pub fn build_report_prompt(input: PromptInput<'_>) -> ReportPrompt {
    let manual = truncate_chars(input.manual_text, MAX_PROMPT_MANUAL_CHARS);
    let results = truncate_chars(input.results_text, MAX_PROMPT_RESULTS_CHARS);

    let mut user = String::new();
    if let Some(title) = input.title.map(str::trim).filter(|t| !t.is_empty()) {
        user.push_str(&format!("Report title: {title}\n\n"));
    }
    let metadata = metadata_lines(input.practical_metadata);
    if !metadata.is_empty() {
        user.push_str(&format!("Practical details:\n{metadata}\n\n"));
    }
    user.push_str(&format!("LAB MANUAL:\n{manual}\n\n"));
    user.push_str(&format!("EXPERIMENTAL RESULTS:\n{results}\n\n"));
    user.push_str(&format!(
        "Return a JSON object with the keys \"title\", {}. \
         Use strings for prose sections and arrays of strings for \"apparatus\" and \"references\".",
        SECTION_KEYS
            .iter()
            .map(|k| format!("\"{k}\""))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    ReportPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
