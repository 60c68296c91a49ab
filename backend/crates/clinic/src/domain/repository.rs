//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the infrastructure
//! layer. Every method is one unit of work: a single statement (or, for
//! doctor registration, one short transaction) executed and committed before
//! the call returns. No repository retries; a store failure is terminal for
//! that call.

use chrono::{DateTime, Utc};
use kernel::id::{AppointmentId, DoctorId, PatientId, UserId};

use crate::domain::entity::{
    appointment::{AppointmentOverview, ScheduleEntry},
    doctor::Doctor,
    patient::{NewPatient, PatientRecord},
    user::{NewUser, User},
};
use crate::domain::value_object::username::Username;
use crate::error::ClinicResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return the generated id
    ///
    /// For [`crate::domain::value_object::role::Role::Doctor`] the linked
    /// doctor row (name = username, specialty [`crate::domain::entity::doctor::DEFAULT_SPECIALTY`],
    /// `user_id` back-reference) is inserted in the same transaction: both
    /// rows commit or neither does. A duplicate username surfaces as
    /// [`crate::error::ClinicError::UsernameTaken`].
    async fn create(&self, user: &NewUser) -> ClinicResult<UserId>;

    /// Find user by username (exact match)
    async fn find_by_username(&self, username: &Username) -> ClinicResult<Option<User>>;
}

/// Doctor repository trait
#[trait_variant::make(DoctorRepository: Send)]
pub trait LocalDoctorRepository {
    /// Insert a doctor and return the generated id
    ///
    /// Names are not unique; duplicates are permitted.
    async fn add(&self, name: &str, specialty: &str) -> ClinicResult<DoctorId>;

    /// List all doctors (storage order; fresh query each call)
    async fn list(&self) -> ClinicResult<Vec<Doctor>>;

    /// Delete by id; a missing id is a silent no-op
    async fn delete(&self, id: DoctorId) -> ClinicResult<()>;

    /// Resolve the doctor row linked to a login account
    async fn find_by_user_id(&self, user_id: UserId) -> ClinicResult<Option<DoctorId>>;
}

/// Patient repository trait
#[trait_variant::make(PatientRepository: Send)]
pub trait LocalPatientRepository {
    /// Insert a patient and return the generated id
    ///
    /// `doctor_id` is stored as given — not validated against the doctors
    /// table.
    async fn add(&self, patient: &NewPatient) -> ClinicResult<PatientId>;

    /// List all patients, left-joined with the assigned doctor
    async fn list(&self) -> ClinicResult<Vec<PatientRecord>>;

    /// Delete by id; a missing id is a silent no-op
    async fn delete(&self, id: PatientId) -> ClinicResult<()>;
}

/// Appointment repository trait
#[trait_variant::make(AppointmentRepository: Send)]
pub trait LocalAppointmentRepository {
    /// Book an appointment and return the generated id
    ///
    /// No overlap check: double-booking the same doctor or patient at the
    /// same time succeeds.
    async fn book(
        &self,
        patient_id: PatientId,
        doctor_id: DoctorId,
        appointment_time: DateTime<Utc>,
    ) -> ClinicResult<AppointmentId>;

    /// Delete by id; a missing id is a silent no-op
    async fn delete(&self, id: AppointmentId) -> ClinicResult<()>;

    /// One doctor's schedule, ordered by appointment_time ascending
    async fn list_by_doctor(&self, doctor_id: DoctorId) -> ClinicResult<Vec<ScheduleEntry>>;

    /// All appointments joined with patient and doctor names, ordered by
    /// appointment_time ascending
    async fn list_all(&self) -> ClinicResult<Vec<AppointmentOverview>>;
}
