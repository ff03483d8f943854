use actix_web::{web, HttpResponse};

use super::model::{CreateUserInputResponse, FarmProfile, FarmProfileRequest, UserInput};
use crate::error::ApiError;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/user-inputs",
    tag = "User Inputs",
    request_body = FarmProfileRequest,
    responses(
        (status = 200, description = "Farm profile stored", body = CreateUserInputResponse),
        (status = 400, description = "A required field is missing", body = crate::ErrorResponse),
        (status = 500, description = "Database failure", body = crate::ErrorResponse)
    )
)]
pub async fn create_user_input(
    state: web::Data<AppState>,
    body: web::Json<FarmProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let profile = FarmProfile::try_from(body.into_inner())?;
    log::info!(
        "Storing farm profile for user '{}' at '{}'",
        profile.user_id,
        profile.location
    );

    let id = state
        .user_inputs
        .insert_user_input(&profile)
        .await
        .map_err(|e| ApiError::persistence("Failed to save user input", &e))?;

    Ok(HttpResponse::Ok().json(CreateUserInputResponse { success: true, id }))
}

#[utoipa::path(
    get,
    path = "/api/user-inputs/{user_id}",
    tag = "User Inputs",
    params(
        ("user_id" = String, Path, description = "Correlation key the profiles were submitted under")
    ),
    responses(
        (status = 200, description = "Profiles, most recent first", body = Vec<UserInput>),
        (status = 500, description = "Database failure", body = crate::ErrorResponse)
    )
)]
pub async fn get_user_inputs(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let rows = state
        .user_inputs
        .list_user_inputs(&user_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to fetch user inputs", &e))?;

    log::debug!("Fetched {} farm profiles for '{}'", rows.len(), user_id);
    Ok(HttpResponse::Ok().json(rows))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/user-inputs").route(web::post().to(create_user_input)))
        .service(web::resource("/user-inputs/{user_id}").route(web::get().to(get_user_inputs)));
}
