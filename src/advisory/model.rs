use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{
    lenient_string, lenient_text, validate_required, ValidationErrors, Validator,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropTask {
    #[serde(default, deserialize_with = "lenient_text")]
    pub task: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "High")]
    pub importance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropPhase {
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "Land Preparation")]
    pub phase_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "Week 1-2")]
    pub week_range: String,
    #[serde(default)]
    pub tasks: Vec<CropTask>,
    #[serde(default)]
    pub milestones: Vec<String>,
}

/// Week-by-week cultivation plan for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropPlan {
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "Rice")]
    pub crop_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "120 days")]
    pub total_duration: String,
    #[serde(default)]
    pub phases: Vec<CropPhase>,
    #[serde(default)]
    pub general_tips: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl CropPlan {
    /// Every string leaf, in serialization order.
    pub fn leaf_strings_mut(&mut self) -> Vec<&mut String> {
        let mut leaves = vec![&mut self.crop_name, &mut self.total_duration];
        for phase in &mut self.phases {
            leaves.push(&mut phase.phase_name);
            leaves.push(&mut phase.week_range);
            for task in &mut phase.tasks {
                leaves.push(&mut task.task);
                leaves.push(&mut task.description);
                leaves.push(&mut task.importance);
            }
            leaves.extend(phase.milestones.iter_mut());
        }
        leaves.extend(self.general_tips.iter_mut());
        leaves.extend(self.warnings.iter_mut());
        leaves
    }
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropPlanRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Tomato")]
    pub crop_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub land_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub land_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub api_key: Option<String>,
}

impl Validator for CropPlanRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(self.crop_name.as_deref(), "cropName", "Crop name", &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetectionRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_base64: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Tomato")]
    pub crop_type: Option<String>,
}

impl Validator for DiseaseDetectionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(
            self.image_base64.as_deref(),
            "imageBase64",
            "Image data",
            &mut errors,
        );
        errors.into_result()
    }
}
