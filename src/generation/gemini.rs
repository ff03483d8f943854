use async_trait::async_trait;
use serde_json::{json, Value};

use super::{GenerationError, TextGenerator};
use crate::config::GeminiConfig;

/// Client for the Gemini `generateContent` endpoint.
///
/// The API key travels as the `key` query parameter.
pub struct GeminiClient {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Concatenate the text parts of the first candidate.
pub fn extract_candidate_text(payload: &Value) -> Result<String, GenerationError> {
    let parts = payload
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| GenerationError::MalformedResponse("no candidate content".to_string()))?;

    let text: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "candidate has no text parts".to_string(),
        ));
    }

    Ok(text.concat())
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        log::debug!("Sending {} prompt characters to {}", prompt.len(), self.config.model);

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        extract_candidate_text(&payload)
    }
}
