//! HTTP API module for the medication endpoints.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
