//! HTTP API handlers.

use std::fmt;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::error::MedicationError;
use crate::medication::{
    Medication, MedicationId, MedicationPatch, MedicationStore, NewMedication,
};
use crate::metrics::{self, LatencyTimer};

use super::error::ErrorResponse;
use super::extract::JsonBody;

/// Text returned by the root endpoint.
pub const BANNER: &str = "Backend Medicamentos rodando no Codespaces! 💊";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The medication collection.
    pub store: MedicationStore,
    /// Prometheus handle, present when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state around a store, without metrics exposition.
    pub fn new(store: MedicationStore) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Expose metrics rendered from `handle`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MedicationStore::seeded())
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
}

/// Resolve a path segment to a record id. Segments that are not ids match nothing.
fn parse_id(raw: &str) -> Result<MedicationId, MedicationError> {
    MedicationId::from_path_segment(raw).ok_or_else(|| {
        debug!(id = raw, "Path segment is not a medication id");
        MedicationError::NotFound
    })
}

/// Count a failed request before handing it back to axum.
fn observe(err: MedicationError) -> MedicationError {
    match err {
        MedicationError::Validation => metrics::inc_validation_failures(),
        MedicationError::NotFound => metrics::inc_not_found(),
        MedicationError::MalformedBody(_) => {}
    }
    debug!(error = %err, "Request rejected");
    err
}

/// Root handler - confirms the service is up.
#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    responses(
        (status = 200, description = "Service banner", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> &'static str {
    BANNER
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Service",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Metrics handler - renders Prometheus text, 404 when metrics are disabled.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// List every medication in insertion order.
#[utoipa::path(
    get,
    path = "/medicamentos",
    tag = "Medicamentos",
    responses((status = 200, description = "All records", body = Vec<Medication>))
)]
#[tracing::instrument(skip(state))]
pub async fn list_medications(State(state): State<AppState>) -> Json<Vec<Medication>> {
    let _timer = LatencyTimer::new("list_medications");
    Json(state.store.list().await)
}

/// Create a medication.
#[utoipa::path(
    post,
    path = "/medicamentos",
    tag = "Medicamentos",
    request_body = NewMedication,
    responses(
        (status = 201, description = "Record created", body = Medication),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create_medication(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewMedication>,
) -> Result<(StatusCode, Json<Medication>), MedicationError> {
    let _timer = LatencyTimer::new("create_medication");

    let record = state.store.create(payload).await.map_err(observe)?;
    metrics::inc_medications_created();
    info!(id = %record.id, name = %record.name, "Medication registered");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Update the supplied fields of a medication.
#[utoipa::path(
    put,
    path = "/medicamentos/{id}",
    tag = "Medicamentos",
    params(("id" = u64, Path, description = "Record id")),
    request_body = MedicationPatch,
    responses(
        (status = 200, description = "Record updated", body = Medication),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "No record with this id", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<MedicationPatch>,
) -> Result<Json<Medication>, MedicationError> {
    let _timer = LatencyTimer::new("update_medication");

    let id = parse_id(&id).map_err(observe)?;
    let record = state.store.update(id, patch).await.map_err(observe)?;
    metrics::inc_medications_updated();

    Ok(Json(record))
}

/// Delete a medication.
#[utoipa::path(
    delete,
    path = "/medicamentos/{id}",
    tag = "Medicamentos",
    params(("id" = u64, Path, description = "Record id")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "No record with this id", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, MedicationError> {
    let _timer = LatencyTimer::new("delete_medication");

    let id = parse_id(&id).map_err(observe)?;
    let removed = state.store.delete(id).await.map_err(observe)?;
    metrics::inc_medications_deleted();
    info!(id = %removed.id, "Medication removed");

    Ok(StatusCode::NO_CONTENT)
}
