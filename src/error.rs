//! Unified error types for the medication service.

use thiserror::Error;

/// Message returned when a create request is missing a required field.
pub const VALIDATION_MESSAGE: &str = "Preencha nome, dosagem e horário.";

/// Message returned when no record matches the requested id.
pub const NOT_FOUND_MESSAGE: &str = "Medicamento não encontrado";

/// Top-level error type for starting and running the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced at the request boundary of the medication endpoints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MedicationError {
    /// `name`, `dosage` or `schedule` missing or empty on create.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    /// No record matches the requested id.
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Request body was declared as JSON but could not be decoded.
    #[error("{0}")]
    MalformedBody(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
