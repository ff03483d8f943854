//! Request validation shared by every JSON endpoint.
//!
//! Requests arrive from browser forms, so "missing" covers absent keys, `null`
//! and blank strings alike. Numeric form values (e.g. `landSize: 2.5`) are
//! accepted and carried as their textual form.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Trait for validating request objects before any upstream work happens.
pub trait Validator {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Request field name as sent by the client (camelCase).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Message placed in the `error` key of the 400 response.
    ///
    /// A single failure keeps its own wording; several are summarised by field name.
    pub fn to_message(&self) -> String {
        match self.errors.as_slice() {
            [] => String::new(),
            [only] => only.message.clone(),
            many => format!(
                "Missing required fields: {}",
                many.iter()
                    .map(|e| e.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message())
    }
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub fn validate_required(
    value: Option<&str>,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) {
    if is_blank(value) {
        errors.add(ValidationError::required(field, label));
    }
}

/// Deserialize strings, numbers and booleans into `Option<String>`; `null` becomes `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Like [`lenient_string`], but `null` becomes an empty string.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}
