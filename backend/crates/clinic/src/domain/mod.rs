//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the
//! session/authorization gate.

pub mod entity;
pub mod repository;
pub mod session;
pub mod value_object;

// Re-exports
pub use entity::{
    appointment::{AppointmentOverview, ScheduleEntry},
    doctor::Doctor,
    patient::{NewPatient, PatientRecord},
    user::{NewUser, User},
};
pub use repository::{
    AppointmentRepository, DoctorRepository, PatientRepository, UserRepository,
};
pub use session::{Operation, Session};
