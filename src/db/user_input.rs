//! User input database operations

use async_trait::async_trait;
use sqlx::PgPool;

use super::UserInputStore;
use crate::user_input::model::{FarmProfile, UserInput};

const CREATE_USER_INPUTS: &str = r#"
    CREATE TABLE IF NOT EXISTS user_inputs (
        id SERIAL PRIMARY KEY,
        user_id TEXT NOT NULL DEFAULT 'anonymous',
        location TEXT NOT NULL,
        land_size TEXT NOT NULL,
        land_type TEXT NOT NULL,
        land_health TEXT,
        season TEXT NOT NULL,
        water_facility TEXT NOT NULL,
        duration TEXT NOT NULL,
        language TEXT NOT NULL DEFAULT 'en',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const CREATE_USER_ID_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_user_inputs_user_id ON user_inputs (user_id)";

pub struct PgUserInputStore {
    pool: PgPool,
}

impl PgUserInputStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `user_inputs` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_USER_INPUTS).execute(&self.pool).await?;
        sqlx::query(CREATE_USER_ID_INDEX).execute(&self.pool).await?;
        log::info!("user_inputs table ready");
        Ok(())
    }
}

#[async_trait]
impl UserInputStore for PgUserInputStore {
    async fn insert_user_input(&self, profile: &FarmProfile) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO user_inputs
                (user_id, location, land_size, land_type, land_health, season, water_facility, duration, language)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&profile.user_id)
        .bind(&profile.location)
        .bind(&profile.land_size)
        .bind(&profile.land_type)
        .bind(profile.land_health.as_deref())
        .bind(&profile.season)
        .bind(&profile.water_facility)
        .bind(&profile.duration)
        .bind(&profile.language)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_user_inputs(&self, user_id: &str) -> Result<Vec<UserInput>, sqlx::Error> {
        sqlx::query_as::<_, UserInput>(
            r#"
            SELECT id, user_id, location, land_size, land_type, land_health, season,
                   water_facility, duration, language, created_at
            FROM user_inputs
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
