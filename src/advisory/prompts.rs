//! Prompt builders for the generation endpoint.

use super::model::CropPlanRequest;
use crate::user_input::model::FarmProfile;

/// Characters of the uploaded image forwarded to the model.
pub const IMAGE_EXCERPT_CHARS: usize = 1000;

fn or_unspecified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("Not specified")
}

pub fn crop_analysis_prompt(profile: &FarmProfile) -> String {
    format!(
        r###"You are an expert agronomist advising a smallholder farmer.

Farm details:
- Location: {location}
- Land size: {land_size}
- Soil type: {land_type}
- Soil health: {land_health}
- Season: {season}
- Water availability: {water}
- Crop duration preference: {duration}

Write a complete farm advisory report in English using markdown:
- Use "#" and "##" headings for sections.
- Cover recommended crops (with reasons), soil preparation, irrigation schedule,
  fertilizer and pest management, expected costs and returns, and market tips.
- Present costs and returns as a markdown table with a header row, columns
  separated by "|", and a blank line after the table.
- Use "- " bullet points for actionable steps.
Do not wrap the answer in code fences and do not return JSON."###,
        location = profile.location,
        land_size = profile.land_size,
        land_type = profile.land_type,
        land_health = or_unspecified(profile.land_health.as_deref()),
        season = profile.season,
        water = profile.water_facility,
        duration = profile.duration,
    )
}

pub fn crop_plan_prompt(request: &CropPlanRequest) -> String {
    format!(
        r#"Create a detailed week-by-week cultivation plan for {crop}.

Farm details:
- Location: {location}
- Land size: {land_size}
- Soil type: {land_type}
- Season: {season}

Respond with only a JSON object of this exact shape:
{{
  "cropName": "string",
  "totalDuration": "string",
  "phases": [
    {{
      "phaseName": "string",
      "weekRange": "string",
      "tasks": [
        {{ "task": "string", "description": "string", "importance": "High | Medium | Low" }}
      ],
      "milestones": ["string"]
    }}
  ],
  "generalTips": ["string"],
  "warnings": ["string"]
}}"#,
        crop = or_unspecified(request.crop_name.as_deref()),
        location = or_unspecified(request.location.as_deref()),
        land_size = or_unspecified(request.land_size.as_deref()),
        land_type = or_unspecified(request.land_type.as_deref()),
        season = or_unspecified(request.season.as_deref()),
    )
}

/// The leading characters of the base64 payload that are sent to the model.
pub fn image_excerpt(image_base64: &str) -> String {
    image_base64.chars().take(IMAGE_EXCERPT_CHARS).collect()
}

pub fn disease_detection_prompt(image_excerpt: &str, crop_type: Option<&str>) -> String {
    format!(
        r#"You are a plant pathologist. Analyse the crop image below and diagnose any disease.

Crop type: {crop}
Image (base64, truncated): {image}

Respond with only a JSON object of this shape:
{{
  "diseaseName": "string",
  "confidence": "High | Medium | Low",
  "symptoms": ["string"],
  "causes": ["string"],
  "treatment": ["string"],
  "prevention": ["string"]
}}"#,
        crop = or_unspecified(crop_type),
        image = image_excerpt,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> FarmProfile {
        FarmProfile {
            user_id: "anonymous".to_string(),
            location: "Guntur".to_string(),
            land_size: "3 acres".to_string(),
            land_type: "Red soil".to_string(),
            land_health: None,
            season: "Kharif".to_string(),
            water_facility: "Canal".to_string(),
            duration: "Short".to_string(),
            language: "te".to_string(),
        }
    }

    #[test]
    fn test_analysis_prompt_includes_profile() {
        let prompt = crop_analysis_prompt(&profile());
        assert!(prompt.contains("Location: Guntur"));
        assert!(prompt.contains("Soil health: Not specified"));
        assert!(prompt.contains("Water availability: Canal"));
    }

    #[test]
    fn test_plan_prompt_has_schema() {
        let request = CropPlanRequest {
            crop_name: Some("Chilli".to_string()),
            ..Default::default()
        };
        let prompt = crop_plan_prompt(&request);
        assert!(prompt.contains("cultivation plan for Chilli"));
        assert!(prompt.contains("\"generalTips\""));
        assert!(prompt.contains("Location: Not specified"));
    }

    #[test]
    fn test_image_excerpt_truncates() {
        let image = "A".repeat(5000);
        assert_eq!(image_excerpt(&image).len(), IMAGE_EXCERPT_CHARS);
        assert_eq!(image_excerpt("abc"), "abc");
    }
}
