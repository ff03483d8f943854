use async_trait::async_trait;
use serde_json::Value;

use super::{FallbackReason, TranslationOutcome, Translator};
use crate::config::TranslateConfig;

/// Google Cloud Translation (v2, form-encoded) client.
pub struct GoogleTranslator {
    http_client: reqwest::Client,
    config: TranslateConfig,
}

impl GoogleTranslator {
    pub fn new(config: TranslateConfig, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn resolve_key<'a>(&'a self, request_key: Option<&'a str>) -> Option<&'a str> {
        request_key
            .filter(|k| !k.trim().is_empty())
            .or(self.config.api_key.as_deref())
    }
}

pub fn extract_translated_text(payload: &Value) -> Option<String> {
    payload
        .get("data")?
        .get("translations")?
        .as_array()?
        .first()?
        .get("translatedText")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target: &str,
        source: &str,
        api_key: Option<&str>,
    ) -> TranslationOutcome {
        let Some(key) = self.resolve_key(api_key) else {
            return TranslationOutcome::fell_back(text, FallbackReason::NoApiKey);
        };
        if target.eq_ignore_ascii_case(source) {
            return TranslationOutcome::fell_back(text, FallbackReason::SameLanguage);
        }
        if text.trim().is_empty() {
            return TranslationOutcome::fell_back(text, FallbackReason::EmptyInput);
        }

        let form = [
            ("target", target),
            ("source", source),
            ("key", key),
            ("q", text),
            ("format", "text"),
        ];

        let response = match self
            .http_client
            .post(&self.config.api_url)
            .form(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Translation request failed: {}", e);
                return TranslationOutcome::fell_back(text, FallbackReason::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Translation endpoint returned {}: {}", status, body);
            return TranslationOutcome::fell_back(text, FallbackReason::Status(status.as_u16()));
        }

        match response.json::<Value>().await.ok().as_ref().and_then(extract_translated_text) {
            Some(translated) => TranslationOutcome::Translated(translated),
            None => {
                log::warn!("Translation endpoint returned an unexpected payload");
                TranslationOutcome::fell_back(text, FallbackReason::MalformedResponse)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TRANSLATE_API_URL;
    use serde_json::json;

    fn translator(api_key: Option<&str>) -> GoogleTranslator {
        GoogleTranslator::new(
            TranslateConfig {
                api_key: api_key.map(str::to_string),
                api_url: DEFAULT_TRANSLATE_API_URL.to_string(),
            },
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_no_key_returns_input_unchanged() {
        let t = translator(None);
        for input in ["", "Plant maize after the first rain.", "| a | b |\n# Heading"] {
            let outcome = t.translate(input, "hi", "en", None).await;
            assert_eq!(
                outcome,
                TranslationOutcome::fell_back(input, FallbackReason::NoApiKey)
            );
        }
    }

    #[tokio::test]
    async fn test_blank_request_key_does_not_count() {
        let t = translator(None);
        let outcome = t.translate("text", "hi", "en", Some("  ")).await;
        assert_eq!(outcome.into_text(), "text");
    }

    #[tokio::test]
    async fn test_same_language_short_circuits() {
        let t = translator(Some("configured"));
        let outcome = t.translate("hello", "en", "en", None).await;
        assert_eq!(
            outcome,
            TranslationOutcome::fell_back("hello", FallbackReason::SameLanguage)
        );
    }

    #[test]
    fn test_request_key_overrides_config() {
        let t = translator(Some("configured"));
        assert_eq!(t.resolve_key(Some("client")), Some("client"));
        assert_eq!(t.resolve_key(None), Some("configured"));
    }

    #[test]
    fn test_extract_translated_text() {
        let payload = json!({ "data": { "translations": [{ "translatedText": "नमस्ते" }] } });
        assert_eq!(extract_translated_text(&payload).as_deref(), Some("नमस्ते"));
        assert_eq!(extract_translated_text(&json!({ "error": {} })), None);
    }
}
