//! Runtime configuration loaded from the environment (and `.env` when present).

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TRANSLATE_API_URL: &str =
    "https://translation.googleapis.com/language/translate/v2";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub api_key: Option<String>,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub gemini: GeminiConfig,
    pub translate: TranslateConfig,
    pub report_font_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: raw,
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections,
            host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            allowed_origins,
            gemini: GeminiConfig {
                api_key: required("GEMINI_API_KEY")?,
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: get("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            },
            translate: TranslateConfig {
                api_key: get("TRANSLATE_API_KEY"),
                api_url: get("TRANSLATE_API_URL")
                    .unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.to_string()),
            },
            report_font_path: get("REPORT_FONT_PATH").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/farm"),
            ("GEMINI_API_KEY", "key"),
        ]))
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.translate.api_key, None);
        assert!(config.allowed_origins.is_empty());
        assert!(config.report_font_path.is_none());
    }

    #[test]
    fn test_missing_gemini_key() {
        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "GEMINI_API_KEY must be set");
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "  "),
            ("GEMINI_API_KEY", "key"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("GEMINI_API_KEY", "key"),
            ("SERVER_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SERVER_PORT", .. }));
    }

    #[test]
    fn test_origins_split_and_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("GEMINI_API_KEY", "key"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://farm.example ,"),
            ("TRANSLATE_API_KEY", "tkey"),
        ]))
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://farm.example"]
        );
        assert_eq!(config.translate.api_key.as_deref(), Some("tkey"));
    }
}
