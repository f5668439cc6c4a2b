//! OpenAPI document for the HTTP API.

use axum::Json;
use utoipa::OpenApi;

use crate::medication::{Medication, MedicationPatch, NewMedication};

use super::error::ErrorResponse;
use super::handlers::{self, HealthResponse};

/// OpenAPI description of the service endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "Medication Service", description = "In-memory medication records"),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_medications,
        handlers::create_medication,
        handlers::update_medication,
        handlers::delete_medication,
    ),
    components(schemas(
        Medication,
        NewMedication,
        MedicationPatch,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "Medicamentos", description = "Medication records"),
        (name = "Service", description = "Liveness endpoints"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
