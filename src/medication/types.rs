//! Medication record types and request payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Identifier of a medication record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct MedicationId(pub u64);

impl MedicationId {
    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Resolve a path segment by numeric value, so `"1"`, `" 1 "`, `"+1"`,
    /// `"1.0"`, `"1e0"` and `"0x1"` all name id 1. `None` when the segment
    /// is not a non-negative whole number.
    pub fn from_path_segment(raw: &str) -> Option<Self> {
        if let Ok(id) = raw.parse() {
            return Some(id);
        }

        let trimmed = raw.trim();
        let radix = match trimmed.get(..2) {
            Some("0x") | Some("0X") => Some(16),
            Some("0o") | Some("0O") => Some(8),
            Some("0b") | Some("0B") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return u64::from_str_radix(&trimmed[2..], radix).ok().map(Self);
        }

        let value: f64 = trimmed.parse().ok()?;
        if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= u64::MAX as f64
        {
            Some(Self(value as u64))
        } else {
            None
        }
    }
}

impl fmt::Display for MedicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MedicationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A stored medication record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Medication {
    /// Unique record id.
    #[schema(value_type = u64, example = 1)]
    pub id: MedicationId,
    /// Medication name.
    #[schema(example = "Dipirona")]
    pub name: String,
    /// Free-form dosage (e.g. "500mg").
    #[schema(example = "500mg")]
    pub dosage: String,
    /// Time of day to take it (e.g. "08:00"), not validated.
    #[schema(example = "08:00")]
    pub schedule: String,
}

/// Body of a create request.
///
/// Fields accept any JSON value so a missing or falsy field becomes a
/// validation error instead of a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewMedication {
    #[serde(default, alias = "nome")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[serde(default, alias = "dosagem")]
    #[schema(value_type = Option<String>)]
    pub dosage: Option<Value>,
    #[serde(default, alias = "horario")]
    #[schema(value_type = Option<String>)]
    pub schedule: Option<Value>,
}

/// Body of an update request. Absent or falsy fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct MedicationPatch {
    #[serde(default, alias = "nome")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[serde(default, alias = "dosagem")]
    #[schema(value_type = Option<String>)]
    pub dosage: Option<Value>,
    #[serde(default, alias = "horario")]
    #[schema(value_type = Option<String>)]
    pub schedule: Option<Value>,
}

/// Text of a truthy value. `null`, `false`, `0` and `""` count as absent.
fn present(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(n) if n.as_f64().is_some_and(|n| n == 0.0 || n.is_nan()) => None,
        other => Some(other.to_string()),
    }
}

impl NewMedication {
    /// Build a complete payload.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            dosage: Some(Value::String(dosage.into())),
            schedule: Some(Value::String(schedule.into())),
        }
    }

    /// Turn the payload into a record with the given id, or `None` when any
    /// field is missing or falsy.
    pub fn into_record(self, id: MedicationId) -> Option<Medication> {
        Some(Medication {
            id,
            name: present(self.name)?,
            dosage: present(self.dosage)?,
            schedule: present(self.schedule)?,
        })
    }
}

impl MedicationPatch {
    /// Overwrite the fields of `record` supplied by this patch. The id never changes.
    pub fn apply(self, record: &mut Medication) {
        if let Some(name) = present(self.name) {
            record.name = name;
        }
        if let Some(dosage) = present(self.dosage) {
            record.dosage = dosage;
        }
        if let Some(schedule) = present(self.schedule) {
            record.schedule = schedule;
        }
    }
}
