//! In-memory medication records over HTTP.
//!
//! A small JSON service keeping an ordered list of medication records
//! (name, dosage and time of day) in process memory:
//!
//! ```text
//! GET    /                  banner
//! GET    /medicamentos      list records
//! POST   /medicamentos      create a record
//! PUT    /medicamentos/:id  update supplied fields
//! DELETE /medicamentos/:id  remove a record
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`medication`]: Record types and the in-memory store
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod medication;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{MedicationError, Result, ServiceError};
