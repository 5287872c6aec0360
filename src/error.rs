use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;

/// Errors raised by job operations
///
/// `Validation` and `NotFound` are caller-recoverable. Any store failure
/// that is not a recognised pattern stays a `Database` error.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No job: {0}")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, JobError>;

impl ResponseError for JobError {
    fn status_code(&self) -> StatusCode {
        match self {
            JobError::Validation(_) => StatusCode::BAD_REQUEST,
            JobError::NotFound(_) => StatusCode::NOT_FOUND,
            JobError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            JobError::Database(e) => {
                error!("Database error: {}", e);
                ErrorResponse {
                    error: "Failed to process request".to_string(),
                    fields: serde_json::json!({"message": "Database error occurred"}),
                }
            }
            JobError::Validation(msg) => {
                warn!("Validation error: {}", msg);
                ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::json!({"message": msg}),
                }
            }
            JobError::NotFound(id) => {
                warn!("Job not found: {}", id);
                ErrorResponse {
                    error: "Not found".to_string(),
                    fields: serde_json::json!({"message": format!("No job: {}", id)}),
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
