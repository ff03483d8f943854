use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::generation::GenerationError;
use crate::report::ReportError;
use crate::validation::ValidationErrors;
use crate::ErrorResponse;

/// Errors surfaced by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{message}")]
    Persistence { message: String, details: String },
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn persistence(message: &str, source: &sqlx::Error) -> Self {
        Self::Persistence {
            message: message.to_string(),
            details: source.to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_message())
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(msg) => ErrorResponse::new(msg),
            ApiError::Upstream(msg) => {
                log::error!("Upstream failure: {}", msg);
                ErrorResponse::new(msg)
            }
            ApiError::Persistence { message, details } => {
                log::error!("{}: {}", message, details);
                ErrorResponse::with_details(message, details)
            }
            ApiError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                ErrorResponse::new(msg)
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_required, ValidationErrors};

    #[test]
    fn test_validation_maps_to_bad_request() {
        let mut errors = ValidationErrors::new();
        validate_required(None, "imageBase64", "Image data", &mut errors);
        let err = ApiError::from(errors);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Image data is required");
    }

    #[test]
    fn test_upstream_maps_to_internal_error() {
        let err = ApiError::from(GenerationError::Upstream {
            status: 403,
            body: "API key not valid".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_persistence_keeps_details() {
        let err = ApiError::persistence("Failed to save user input", &sqlx::Error::PoolTimedOut);
        match err {
            ApiError::Persistence { message, details } => {
                assert_eq!(message, "Failed to save user input");
                assert!(!details.is_empty());
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
