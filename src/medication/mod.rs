//! Medication records and the in-memory collection holding them.
//!
//! This module handles:
//! - Record and payload types
//! - The shared store with create/list/update/delete

pub mod store;
pub mod types;

pub use store::MedicationStore;
pub use types::{Medication, MedicationId, MedicationPatch, NewMedication};
