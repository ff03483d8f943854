use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde_json::json;

use super::model::{CropPlan, CropPlanRequest, DiseaseDetectionRequest};
use super::prompts;
use crate::error::ApiError;
use crate::generation::AdvisoryResult;
use crate::report::{render_advisory_report, FontSource, ReportError};
use crate::translation::{translate_advisory, translate_leaves, TranslationTarget};
use crate::user_input::model::{FarmProfile, FarmProfileRequest, DEFAULT_LANGUAGE};
use crate::validation::Validator;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/crop-analysis",
    tag = "Advisory",
    request_body = FarmProfileRequest,
    responses(
        (status = 200, description = "Advisory report as an application/pdf attachment"),
        (status = 400, description = "A required field is missing", body = crate::ErrorResponse),
        (status = 500, description = "Generation or rendering failed", body = crate::ErrorResponse)
    )
)]
pub async fn crop_analysis(
    state: web::Data<AppState>,
    body: web::Json<FarmProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let api_key = request.api_key.clone();
    let profile = FarmProfile::try_from(request)?;
    log::info!(
        "Generating crop analysis for '{}' ({}, {})",
        profile.location,
        profile.season,
        profile.language
    );

    let prompt = prompts::crop_analysis_prompt(&profile);
    let mut advisory = state.generator.generate(&prompt).await?;

    let target = TranslationTarget::new(&profile.language, api_key.as_deref());
    if !target.is_source_language() {
        translate_advisory(state.translator.as_ref(), &mut advisory, target).await;
    }

    let font = state.report_font.clone();
    let document = web::block(move || {
        let source = match font.as_deref() {
            Some(bytes) => FontSource::External(bytes),
            None => FontSource::Builtin,
        };
        render_advisory_report(&advisory, source)
    })
    .await
    .map_err(|e| ReportError::Join(e.to_string()))??;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        // Keeps the response compressor away so Content-Length stays exact.
        .insert_header((header::CONTENT_ENCODING, "identity"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename),
        ))
        .body(document.pdf))
}

#[utoipa::path(
    post,
    path = "/api/crop-plan",
    tag = "Advisory",
    request_body = CropPlanRequest,
    responses(
        (status = 200, description = "Cultivation plan", body = CropPlan),
        (status = 400, description = "Crop name is missing", body = crate::ErrorResponse),
        (status = 500, description = "Generation failed", body = crate::ErrorResponse)
    )
)]
pub async fn crop_plan(
    state: web::Data<AppState>,
    body: web::Json<CropPlanRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;
    log::info!(
        "Generating crop plan for '{}'",
        request.crop_name.as_deref().unwrap_or_default()
    );

    let prompt = prompts::crop_plan_prompt(&request);
    let value = state
        .generator
        .generate(&prompt)
        .await?
        .into_structured()
        .ok_or_else(|| ApiError::Upstream("Failed to generate a structured crop plan".to_string()))?;

    let mut plan: CropPlan = serde_json::from_value(value).map_err(|e| {
        ApiError::Upstream(format!("Crop plan did not match the expected format: {}", e))
    })?;

    let language = request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let target = TranslationTarget::new(language, request.api_key.as_deref());
    if !target.is_source_language() {
        translate_leaves(state.translator.as_ref(), plan.leaf_strings_mut(), target).await;
    }

    Ok(HttpResponse::Ok().json(plan))
}

#[utoipa::path(
    post,
    path = "/api/disease-detection",
    tag = "Advisory",
    request_body = DiseaseDetectionRequest,
    responses(
        (status = 200, description = "Disease diagnosis", body = Object),
        (status = 400, description = "Image data is missing", body = crate::ErrorResponse),
        (status = 500, description = "Generation failed", body = crate::ErrorResponse)
    )
)]
pub async fn disease_detection(
    state: web::Data<AppState>,
    body: web::Json<DiseaseDetectionRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    // Only a prefix of the payload reaches the model.
    let image = request.image_base64.as_deref().unwrap_or_default();
    let excerpt = prompts::image_excerpt(image);
    log::info!(
        "Disease detection for '{}': forwarding {} of {} image characters",
        request.crop_type.as_deref().unwrap_or("unknown crop"),
        excerpt.chars().count(),
        image.chars().count()
    );

    let prompt = prompts::disease_detection_prompt(&excerpt, request.crop_type.as_deref());
    let diagnosis = match state.generator.generate(&prompt).await? {
        AdvisoryResult::Structured(value) => value,
        AdvisoryResult::Text(text) => json!({ "analysis": text }),
    };

    Ok(HttpResponse::Ok().json(diagnosis))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/crop-analysis").route(web::post().to(crop_analysis)))
        .service(web::resource("/crop-plan").route(web::post().to(crop_plan)))
        .service(web::resource("/disease-detection").route(web::post().to(disease_detection)));
}
