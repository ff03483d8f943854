//! Database module - AppState and persistence of submitted farm profiles.
//!
//! - `user_input` - Postgres-backed [`UserInputStore`]

mod user_input;

pub use user_input::PgUserInputStore;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::generation::{GeminiClient, TextGenerator};
use crate::translation::{GoogleTranslator, Translator};
use crate::user_input::model::{FarmProfile, UserInput};

/// Storage for submitted farm profiles. Rows are insert-only.
#[async_trait]
pub trait UserInputStore {
    /// Persist a profile and return its generated id.
    async fn insert_user_input(&self, profile: &FarmProfile) -> Result<i32, sqlx::Error>;

    /// All profiles submitted under `user_id`, most recent first.
    async fn list_user_inputs(&self, user_id: &str) -> Result<Vec<UserInput>, sqlx::Error>;
}

#[derive(Clone)]
pub struct AppState {
    pub user_inputs: Arc<dyn UserInputStore + Send + Sync>,
    pub generator: Arc<dyn TextGenerator + Send + Sync>,
    pub translator: Arc<dyn Translator + Send + Sync>,
    /// TrueType bytes for reports; `None` uses the built-in Helvetica.
    pub report_font: Option<Arc<Vec<u8>>>,
}

impl AppState {
    pub async fn new_with_config(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(900))
            .connect(&config.database_url)
            .await?;

        let store = PgUserInputStore::new(pool);
        store.ensure_schema().await?;

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .user_agent("farm-advisory-server/0.1")
            .build()?;

        let report_font = match &config.report_font_path {
            Some(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    format!("failed to read REPORT_FONT_PATH {}: {}", path.display(), e)
                })?;
                log::info!("Using report font {}", path.display());
                Some(Arc::new(bytes))
            }
            None => None,
        };

        Ok(Self {
            user_inputs: Arc::new(store),
            generator: Arc::new(GeminiClient::new(config.gemini.clone(), http_client.clone())),
            translator: Arc::new(GoogleTranslator::new(config.translate.clone(), http_client)),
            report_font,
        })
    }

    pub fn new_with_services(
        user_inputs: Arc<dyn UserInputStore + Send + Sync>,
        generator: Arc<dyn TextGenerator + Send + Sync>,
        translator: Arc<dyn Translator + Send + Sync>,
    ) -> Self {
        Self {
            user_inputs,
            generator,
            translator,
            report_font: None,
        }
    }
}
