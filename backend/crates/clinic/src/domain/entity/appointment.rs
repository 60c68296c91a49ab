//! Appointment Read Models
//!
//! Appointments are booked and deleted by id; they are only ever read back
//! through one of the two joined views below. There is no reschedule.

use chrono::{DateTime, Utc};
use kernel::id::AppointmentId;
use serde::Serialize;

/// One entry of a doctor's own schedule (`list_by_doctor`)
///
/// Ordered by `appointment_time` ascending.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub id: AppointmentId,
    pub patient_name: String,
    pub appointment_time: DateTime<Utc>,
}

/// One row of the all-appointments table (`list_all`)
///
/// Three-way join across appointments, patients, and doctors; ordered by
/// `appointment_time` ascending.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentOverview {
    pub id: AppointmentId,
    pub patient_name: String,
    pub doctor_name: String,
    pub appointment_time: DateTime<Utc>,
}
