//! HTTP client for an OpenAI-compatible chat-completions API.
//!
//! Sends the assembled report prompt as a system + user message pair and
//! asks for a JSON object reply.

use std::time::Duration;

use async_trait::async_trait;
use scidraft_core::prompt::ReportPrompt;
use serde::{Deserialize, Serialize};

use crate::generator::{AiError, ReportGenerator};

/// Default provider base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default model name.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 90;
/// Sampling temperature; low so reports stay close to the manual.
const TEMPERATURE: f32 = 0.4;

/// Configuration for the AI provider.
#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AiConfig {
    /// Load AI configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                     |
    /// |-------------------|----------|-----------------------------|
    /// | `AI_API_KEY`      | **yes**  | --                          |
    /// | `AI_BASE_URL`     | no       | `https://api.openai.com/v1` |
    /// | `AI_MODEL`        | no       | `gpt-4o-mini`               |
    /// | `AI_TIMEOUT_SECS` | no       | `90`                        |
    ///
    /// # Panics
    ///
    /// Panics if `AI_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key = std::env::var("AI_API_KEY").expect("AI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "AI_API_KEY must not be empty");

        let base_url = std::env::var("AI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            model,
            timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

fn build_request<'a>(model: &'a str, prompt: &'a ReportPrompt) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: &prompt.system,
            },
            ChatMessage {
                role: "user",
                content: &prompt.user,
            },
        ],
        response_format: ResponseFormat {
            kind: "json_object",
        },
        temperature: TEMPERATURE,
    }
}

/// Pull the first non-blank message content out of a completion.
fn extract_content(response: ChatResponse) -> Result<String, AiError> {
    response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .find(|content| !content.trim().is_empty())
        .ok_or(AiError::EmptyResponse)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`ReportGenerator`] backed by a chat-completions endpoint.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl ChatCompletionsClient {
    /// Build a client whose requests time out after `config.timeout_secs`.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: AiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ReportGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &ReportPrompt) -> Result<String, AiError> {
        let body = build_request(&self.config.model, prompt);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "AI API returned an error status");
            return Err(AiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        extract_content(parsed)
    }
}
