use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{error, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::api::validation::{field_errors_json, ErrorResponse};
use crate::db::job_repository::RepositoryError;

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Job repository failed
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Field-level validation failed
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Job id was malformed or absent from the collection
    #[error("job not found: {0}")]
    JobNotFound(String),

    /// Listing session expired or never existed
    #[error("listing session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("invalid email or password")]
    InvalidCredentials,

    /// Submission could not be accepted; the client may retry
    #[error("submission failed: {0}")]
    Submission(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::JobNotFound(_) | ServiceError::SessionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::Submission(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ServiceError::Repository(e) => {
                error!("Repository error: {}", e);
                HttpResponse::build(status).json(ErrorResponse::message(
                    "Failed to process request",
                    "Job repository unavailable",
                ))
            }
            ServiceError::Validation(errors) => {
                warn!("Validation error: {}", errors);
                HttpResponse::build(status).json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: field_errors_json(errors),
                })
            }
            ServiceError::JobNotFound(id) => {
                warn!("Job not found: {}", id);
                HttpResponse::build(status).json(ErrorResponse::message("Not found", "Job not found"))
            }
            ServiceError::SessionNotFound(id) => {
                warn!("Listing session not found: {}", id);
                HttpResponse::build(status).json(ErrorResponse::message(
                    "Not found",
                    format!("Listing session {} not found", id),
                ))
            }
            ServiceError::InvalidCredentials => {
                warn!("Rejected login attempt");
                HttpResponse::build(status).json(ErrorResponse::message(
                    "Unauthorized",
                    "Invalid email or password",
                ))
            }
            ServiceError::Submission(reason) => {
                error!("Submission failed: {}", reason);
                HttpResponse::build(status).json(ErrorResponse::message(
                    "Submission failed",
                    "There was an error submitting your application. Please try again later.",
                ))
            }
        }
    }
}
