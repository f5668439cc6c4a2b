//! In-memory medication store.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::MedicationError;

use super::types::{Medication, MedicationId, MedicationPatch, NewMedication};

/// Records present when a seeded store is created.
const SEED: [(&str, &str, &str); 2] = [
    ("Dipirona", "500mg", "08:00"),
    ("Vitamina C", "1g", "12:00"),
];

#[derive(Debug)]
struct Inner {
    /// Records in insertion order.
    records: Vec<Medication>,
    /// Id handed to the next created record.
    next_id: MedicationId,
}

impl Inner {
    fn position(&self, id: MedicationId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

/// Ordered collection of medication records shared by all request handlers.
///
/// Cloning yields another handle to the same collection. All reads and writes
/// go through one lock, so mutations are observed in a single order.
#[derive(Debug, Clone)]
pub struct MedicationStore {
    inner: Arc<RwLock<Inner>>,
}

impl MedicationStore {
    /// Create a store without records.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: Vec::new(),
                next_id: MedicationId(1),
            })),
        }
    }

    /// Create a store holding the two startup records.
    pub fn seeded() -> Self {
        let mut records = Vec::with_capacity(SEED.len());
        let mut next_id = MedicationId(1);

        for (name, dosage, schedule) in SEED {
            records.push(Medication {
                id: next_id,
                name: name.to_string(),
                dosage: dosage.to_string(),
                schedule: schedule.to_string(),
            });
            next_id = next_id.next();
        }

        Self {
            inner: Arc::new(RwLock::new(Inner { records, next_id })),
        }
    }

    /// Snapshot of every record in insertion order.
    pub async fn list(&self) -> Vec<Medication> {
        self.inner.read().await.records.clone()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Validate `payload`, assign it a fresh id and append it.
    pub async fn create(&self, payload: NewMedication) -> Result<Medication, MedicationError> {
        let mut inner = self.inner.write().await;

        let record = payload
            .into_record(inner.next_id)
            .ok_or(MedicationError::Validation)?;
        inner.next_id = inner.next_id.next();
        inner.records.push(record.clone());

        debug!(id = %record.id, total = inner.records.len(), "Medication created");
        Ok(record)
    }

    /// Apply `patch` to the first record with `id`.
    pub async fn update(
        &self,
        id: MedicationId,
        patch: MedicationPatch,
    ) -> Result<Medication, MedicationError> {
        let mut inner = self.inner.write().await;

        let index = inner.position(id).ok_or(MedicationError::NotFound)?;
        let record = &mut inner.records[index];
        patch.apply(record);

        debug!(id = %record.id, "Medication updated");
        Ok(record.clone())
    }

    /// Remove the first record with `id`, keeping the order of the rest.
    pub async fn delete(&self, id: MedicationId) -> Result<Medication, MedicationError> {
        let mut inner = self.inner.write().await;

        let index = inner.position(id).ok_or(MedicationError::NotFound)?;
        let removed = inner.records.remove(index);

        debug!(id = %removed.id, total = inner.records.len(), "Medication deleted");
        Ok(removed)
    }
}

impl Default for MedicationStore {
    fn default() -> Self {
        Self::seeded()
    }
}
