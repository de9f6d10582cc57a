use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

const UNEXPECTED: &str = "An unexpected error occurred.";

/// HTTP face of a [`ServiceError`].
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self { Self(err) }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match &self.0 {
            ServiceError::NotFound { entity, id } => {
                warn!(entity, id, "not_found");
                self.0.to_string()
            }
            ServiceError::Concurrency { message, source } => {
                warn!(event = "concurrency_conflict", error = %source, "{message}");
                message.clone()
            }
            ServiceError::Storage { message, source } => {
                error!(error = %source, "{message}");
                message.clone()
            }
            ServiceError::Integrity(detail) => {
                error!(detail = %detail, "integrity violation");
                UNEXPECTED.to_string()
            }
        };
        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
