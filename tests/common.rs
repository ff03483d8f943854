#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use farm_advisory_server::db::UserInputStore;
use farm_advisory_server::generation::{GenerationError, TextGenerator};
use farm_advisory_server::translation::{TranslationOutcome, Translator};
use farm_advisory_server::user_input::model::{FarmProfile, UserInput};
use farm_advisory_server::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Insert-only store backed by a vector.
#[derive(Default)]
pub struct InMemoryUserInputStore {
    rows: Mutex<Vec<UserInput>>,
}

impl InMemoryUserInputStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<UserInput> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserInputStore for InMemoryUserInputStore {
    async fn insert_user_input(&self, profile: &FarmProfile) -> Result<i32, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        rows.push(UserInput {
            id,
            user_id: profile.user_id.clone(),
            location: profile.location.clone(),
            land_size: profile.land_size.clone(),
            land_type: profile.land_type.clone(),
            land_health: profile.land_health.clone(),
            season: profile.season.clone(),
            water_facility: profile.water_facility.clone(),
            duration: profile.duration.clone(),
            language: profile.language.clone(),
            // Strictly increasing so ordering is deterministic.
            created_at: Utc::now() + Duration::seconds(id as i64),
        });
        Ok(id)
    }

    async fn list_user_inputs(&self, user_id: &str) -> Result<Vec<UserInput>, sqlx::Error> {
        let mut rows: Vec<UserInput> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

/// Store whose every call fails, as if the database were unreachable.
pub struct UnavailableStore;

#[async_trait]
impl UserInputStore for UnavailableStore {
    async fn insert_user_input(&self, _profile: &FarmProfile) -> Result<i32, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn list_user_inputs(&self, _user_id: &str) -> Result<Vec<UserInput>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Generator returning a canned reply and counting how often it was asked.
pub struct CountingGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl CountingGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for CountingGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(GenerationError::Upstream {
                status: 503,
                body: message.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationCall {
    pub text: String,
    pub target: String,
    pub api_key: Option<String>,
}

/// Translator prefixing every text with its target language.
#[derive(Default)]
pub struct RecordingTranslator {
    calls: Mutex<Vec<TranslationCall>>,
}

impl RecordingTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<TranslationCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(
        &self,
        text: &str,
        target: &str,
        _source: &str,
        api_key: Option<&str>,
    ) -> TranslationOutcome {
        self.calls.lock().unwrap().push(TranslationCall {
            text: text.to_string(),
            target: target.to_string(),
            api_key: api_key.map(str::to_string),
        });
        TranslationOutcome::Translated(format!("[{}] {}", target, text))
    }
}

pub struct TestServices {
    pub store: Arc<InMemoryUserInputStore>,
    pub generator: Arc<CountingGenerator>,
    pub translator: Arc<RecordingTranslator>,
}

impl TestServices {
    pub fn with_generator(generator: CountingGenerator) -> Self {
        Self {
            store: Arc::new(InMemoryUserInputStore::new()),
            generator: Arc::new(generator),
            translator: Arc::new(RecordingTranslator::new()),
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new_with_services(
            self.store.clone(),
            self.generator.clone(),
            self.translator.clone(),
        )
    }
}

pub fn farm_profile_json() -> serde_json::Value {
    serde_json::json!({
        "location": "Nashik, Maharashtra",
        "landSize": 2.5,
        "landType": "Black soil",
        "landHealth": "Good",
        "season": "Rabi",
        "waterFacility": "Drip irrigation",
        "duration": "4 months",
        "userId": "farmer-42"
    })
}
