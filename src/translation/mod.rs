//! Translation client - best-effort machine translation of model output.
//!
//! Failures never propagate: the caller always gets a string back, and the
//! [`TranslationOutcome`] records whether it is a translation or the original.

pub mod google;

pub use google::GoogleTranslator;

use async_trait::async_trait;
use serde_json::Value;

use crate::generation::AdvisoryResult;

/// Language every prompt asks the model to answer in.
pub const SOURCE_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    NoApiKey,
    SameLanguage,
    EmptyInput,
    Transport(String),
    Status(u16),
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    FellBack {
        original: String,
        reason: FallbackReason,
    },
}

impl TranslationOutcome {
    pub fn fell_back(original: &str, reason: FallbackReason) -> Self {
        Self::FellBack {
            original: original.to_string(),
            reason,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated(_))
    }

    pub fn into_text(self) -> String {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::FellBack { original, .. } => original,
        }
    }
}

/// Per-request translation parameters.
#[derive(Debug, Clone, Copy)]
pub struct TranslationTarget<'a> {
    pub language: &'a str,
    /// Key supplied by the client; overrides the configured key.
    pub api_key: Option<&'a str>,
}

impl<'a> TranslationTarget<'a> {
    pub fn new(language: &'a str, api_key: Option<&'a str>) -> Self {
        Self { language, api_key }
    }

    pub fn is_source_language(&self) -> bool {
        self.language.trim().is_empty() || self.language.eq_ignore_ascii_case(SOURCE_LANGUAGE)
    }
}

#[async_trait]
pub trait Translator {
    async fn translate(
        &self,
        text: &str,
        target: &str,
        source: &str,
        api_key: Option<&str>,
    ) -> TranslationOutcome;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranslationSummary {
    pub translated: usize,
    pub fell_back: usize,
}

/// Translate every leaf in place, one sequential call per leaf.
pub async fn translate_leaves(
    translator: &(dyn Translator + Send + Sync),
    leaves: Vec<&mut String>,
    target: TranslationTarget<'_>,
) -> TranslationSummary {
    let mut summary = TranslationSummary::default();
    for leaf in leaves {
        let outcome = translator
            .translate(leaf, target.language, SOURCE_LANGUAGE, target.api_key)
            .await;
        if outcome.is_translated() {
            summary.translated += 1;
        } else {
            summary.fell_back += 1;
        }
        *leaf = outcome.into_text();
    }
    if summary.fell_back > 0 {
        log::warn!(
            "{} of {} fields left untranslated (target '{}')",
            summary.fell_back,
            summary.translated + summary.fell_back,
            target.language
        );
    }
    summary
}

/// Translate a generated advisory in place: the whole text blob, or every
/// string leaf of a structured result.
pub async fn translate_advisory(
    translator: &(dyn Translator + Send + Sync),
    advisory: &mut AdvisoryResult,
    target: TranslationTarget<'_>,
) -> TranslationSummary {
    match advisory {
        AdvisoryResult::Text(text) => translate_leaves(translator, vec![text], target).await,
        AdvisoryResult::Structured(value) => {
            translate_leaves(translator, json_leaves_mut(value), target).await
        }
    }
}

/// Collect every string leaf of a JSON tree, depth first, in document order.
pub fn json_leaves_mut(value: &mut Value) -> Vec<&mut String> {
    let mut leaves = Vec::new();
    collect_json_leaves(value, &mut leaves);
    leaves
}

fn collect_json_leaves<'a>(value: &'a mut Value, out: &mut Vec<&'a mut String>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => {
            for item in items.iter_mut() {
                collect_json_leaves(item, out);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                collect_json_leaves(item, out);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
