use actix_web::{web, HttpResponse};

use super::fixtures::{
    self, BankLoansResponse, DirectoryRequest, GovernmentOrganizationsResponse,
    LocalMarketResponse, Requirement,
};
use crate::error::ApiError;

#[utoipa::path(
    post,
    path = "/api/local-market",
    tag = "Directory",
    request_body = DirectoryRequest,
    responses(
        (status = 200, description = "Nearby buyers for the crop", body = LocalMarketResponse),
        (status = 400, description = "Location or crop is missing", body = crate::ErrorResponse)
    )
)]
pub async fn local_market(body: web::Json<DirectoryRequest>) -> Result<HttpResponse, ApiError> {
    body.check(Requirement::LocationAndCrop)?;
    Ok(HttpResponse::Ok().json(fixtures::local_market(&body)))
}

#[utoipa::path(
    post,
    path = "/api/government-organizations",
    tag = "Directory",
    request_body = DirectoryRequest,
    responses(
        (status = 200, description = "Agricultural offices near the location", body = GovernmentOrganizationsResponse),
        (status = 400, description = "Location is missing", body = crate::ErrorResponse)
    )
)]
pub async fn government_organizations(
    body: web::Json<DirectoryRequest>,
) -> Result<HttpResponse, ApiError> {
    body.check(Requirement::Location)?;
    Ok(HttpResponse::Ok().json(fixtures::government_organizations(&body)))
}

#[utoipa::path(
    post,
    path = "/api/bank-loans",
    tag = "Directory",
    request_body = DirectoryRequest,
    responses(
        (status = 200, description = "Agricultural loan schemes", body = BankLoansResponse),
        (status = 400, description = "Location or crop is missing", body = crate::ErrorResponse)
    )
)]
pub async fn bank_loans(body: web::Json<DirectoryRequest>) -> Result<HttpResponse, ApiError> {
    body.check(Requirement::LocationAndCrop)?;
    Ok(HttpResponse::Ok().json(fixtures::bank_loans(&body)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/local-market").route(web::post().to(local_market)))
        .service(
            web::resource("/government-organizations")
                .route(web::post().to(government_organizations)),
        )
        .service(web::resource("/bank-loans").route(web::post().to(bank_loans)));
}
