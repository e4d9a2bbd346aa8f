use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures surfaced by the mock services. Lookups keep the fixed messages
/// callers match on; validation failures never reach a service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Variant not found")]
    VariantNotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::ProjectNotFound | ServiceError::VariantNotFound => {
                StatusCode::NOT_FOUND
            }
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
