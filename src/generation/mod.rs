//! Generation client - forwards prompts to the generative-text endpoint and
//! normalizes the model's reply into text or a structured JSON object.

pub mod gemini;
pub mod normalize;

pub use gemini::GeminiClient;
pub use normalize::normalize_reply;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to reach generation endpoint: {0}")]
    Transport(String),
    #[error("generation endpoint returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("generation endpoint returned an unexpected payload: {0}")]
    MalformedResponse(String),
}

/// Normalized model output.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisoryResult {
    Text(String),
    Structured(serde_json::Value),
}

impl AdvisoryResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AdvisoryResult::Text(text) => Some(text),
            AdvisoryResult::Structured(_) => None,
        }
    }

    pub fn into_structured(self) -> Option<serde_json::Value> {
        match self {
            AdvisoryResult::Structured(value) => Some(value),
            AdvisoryResult::Text(_) => None,
        }
    }
}

/// A single-shot text generator. One upstream call per invocation, no retries.
#[async_trait]
pub trait TextGenerator {
    /// Send `prompt` and return the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Send `prompt` and return the normalized reply.
    async fn generate(&self, prompt: &str) -> Result<AdvisoryResult, GenerationError> {
        let raw = self.complete(prompt).await?;
        Ok(normalize_reply(&raw))
    }
}
