use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{lenient_string, validate_required, ValidationErrors, Validator};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const ANONYMOUS_USER: &str = "anonymous";

/// Farm profile fields as posted by the client.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmProfileRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Nashik, Maharashtra")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "2 acres")]
    pub land_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Black cotton soil")]
    pub land_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Moderate organic matter")]
    pub land_health: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Kharif")]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Borewell")]
    pub water_facility: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "6 months")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "hi")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    /// Translation API key; overrides the server's configured key.
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: Option<String>,
}

impl Validator for FarmProfileRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(self.location.as_deref(), "location", "Location", &mut errors);
        validate_required(self.land_size.as_deref(), "landSize", "Land size", &mut errors);
        validate_required(self.land_type.as_deref(), "landType", "Land type", &mut errors);
        validate_required(self.season.as_deref(), "season", "Season", &mut errors);
        validate_required(
            self.water_facility.as_deref(),
            "waterFacility",
            "Water facility",
            &mut errors,
        );
        validate_required(self.duration.as_deref(), "duration", "Duration", &mut errors);
        errors.into_result()
    }
}

/// A validated farm profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmProfile {
    pub user_id: String,
    pub location: String,
    pub land_size: String,
    pub land_type: String,
    pub land_health: Option<String>,
    pub season: String,
    pub water_facility: String,
    pub duration: String,
    pub language: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<FarmProfileRequest> for FarmProfile {
    type Error = ValidationErrors;

    fn try_from(request: FarmProfileRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        Ok(Self {
            user_id: non_blank(request.user_id).unwrap_or_else(|| ANONYMOUS_USER.to_string()),
            location: non_blank(request.location).unwrap_or_default(),
            land_size: non_blank(request.land_size).unwrap_or_default(),
            land_type: non_blank(request.land_type).unwrap_or_default(),
            land_health: non_blank(request.land_health),
            season: non_blank(request.season).unwrap_or_default(),
            water_facility: non_blank(request.water_facility).unwrap_or_default(),
            duration: non_blank(request.duration).unwrap_or_default(),
            language: non_blank(request.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        })
    }
}

/// A stored `user_inputs` row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct UserInput {
    pub id: i32,
    pub user_id: String,
    pub location: String,
    pub land_size: String,
    pub land_type: String,
    pub land_health: Option<String>,
    pub season: String,
    pub water_facility: String,
    pub duration: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserInputResponse {
    pub success: bool,
    pub id: i32,
}
