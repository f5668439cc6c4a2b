//! Mapping of request errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::MedicationError;

/// Error body returned by every failing medication endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message.
    #[schema(example = "Medicamento não encontrado")]
    pub error: String,
}

impl MedicationError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MedicationError::Validation | MedicationError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            MedicationError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for MedicationError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
