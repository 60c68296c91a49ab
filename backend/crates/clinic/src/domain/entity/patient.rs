//! Patient Entity

use kernel::id::{DoctorId, PatientId};
use serde::Serialize;

/// A patient about to be added (no id until the store assigns one)
///
/// `doctor_id` is the optionally assigned doctor. It is NOT validated against
/// the doctors table at this layer — the caller picked it from a live list.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    /// Non-negative by construction
    pub age: u32,
    pub gender: String,
    pub address: String,
    pub doctor_id: Option<DoctorId>,
}

/// Patient row joined with the assigned doctor, as rendered by the patient
/// table
///
/// LEFT JOIN semantics: patients without an assigned doctor (or whose doctor
/// was later deleted) still appear, with both doctor fields `None`.
#[derive(Debug, Clone, Serialize)]
pub struct PatientRecord {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub doctor_name: Option<String>,
    pub doctor_specialty: Option<String>,
}
