//! Generative-AI client used to draft lab reports.
//!
//! - [`generator::ReportGenerator`] -- the seam handlers depend on.
//! - [`client::ChatCompletionsClient`] -- HTTP implementation for an
//!   OpenAI-compatible `/chat/completions` endpoint.

pub mod client;
pub mod generator;

pub use client::{AiConfig, ChatCompletionsClient};
pub use generator::{AiError, ReportGenerator};
