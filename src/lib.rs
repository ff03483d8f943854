use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::error::InternalError;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod advisory;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod generation;
pub mod report;
pub mod translation;
pub mod user_input;
pub mod validation;

pub use crate::db::AppState;

/// Largest JSON body accepted; image uploads travel as base64 inside JSON.
pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(message: &str, details: &str) -> Self {
        Self {
            error: message.to_string(),
            details: Some(details.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Malformed or oversized JSON bodies answer 400 with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let body = ErrorResponse::new(&format!("Invalid request body: {}", err));
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}

/// Every route the server exposes, minus middleware and documentation.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api")
            .app_data(json_config())
            .configure(user_input::config)
            .configure(advisory::config)
            .configure(directory::config),
    );
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health,
        crate::user_input::handlers::create_user_input,
        crate::user_input::handlers::get_user_inputs,
        crate::advisory::handlers::crop_analysis,
        crate::advisory::handlers::crop_plan,
        crate::advisory::handlers::disease_detection,
        crate::directory::handlers::local_market,
        crate::directory::handlers::government_organizations,
        crate::directory::handlers::bank_loans
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            user_input::model::FarmProfileRequest,
            user_input::model::UserInput,
            user_input::model::CreateUserInputResponse,
            advisory::model::CropPlanRequest,
            advisory::model::CropPlan,
            advisory::model::CropPhase,
            advisory::model::CropTask,
            advisory::model::DiseaseDetectionRequest,
            directory::fixtures::DirectoryRequest,
            directory::fixtures::LocalMarketResponse,
            directory::fixtures::MarketVendor,
            directory::fixtures::GovernmentOrganizationsResponse,
            directory::fixtures::GovernmentOrganization,
            directory::fixtures::BankLoansResponse,
            directory::fixtures::LoanScheme,
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe."),
        (name = "User Inputs", description = "Submitted farm profiles."),
        (name = "Advisory", description = "Model-generated reports, crop plans and diagnoses."),
        (name = "Directory", description = "Local markets, government offices and loan schemes.")
    )
)]
pub struct ApiDoc;

fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };
    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::new_with_config(&config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialise services. Please check DATABASE_URL in .env and ensure the database is running. Error: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("farm_advisory_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!(
        "Starting server at http://{}:{} (model {})",
        config.host,
        config.port,
        config.gemini.model
    );

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(build_cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
