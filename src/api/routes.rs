//! HTTP API route definitions.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    create_medication, delete_medication, health, list_medications, metrics_handler, root,
    update_medication, AppState,
};
use super::openapi::openapi_json;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        // Medication records
        .route(
            "/medicamentos",
            get(list_medications).post(create_medication),
        )
        .route(
            "/medicamentos/:id",
            put(update_medication).delete(delete_medication),
        )
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
