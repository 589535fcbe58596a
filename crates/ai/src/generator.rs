use async_trait::async_trait;
use scidraft_core::prompt::ReportPrompt;

/// Errors from the generative-AI layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("AI API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered, but without usable content.
    #[error("AI API returned no content")]
    EmptyResponse,
}

/// Produces the raw text of a report from an assembled prompt.
///
/// The returned string is expected to hold a JSON object; parsing and
/// validation happen in `scidraft_core::report`.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, prompt: &ReportPrompt) -> Result<String, AiError>;
}
