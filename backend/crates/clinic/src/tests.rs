//! Scenario tests for the clinic crate
//!
//! Run against an in-memory repository double that honors the same contracts
//! as the Postgres implementation (unique usernames, atomic doctor-link
//! registration, no-op deletes, join semantics on the list views).

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use kernel::id::{AppointmentId, DoctorId, Id, PatientId, UserId};

use crate::application::{
    AuthenticateInput, AuthenticateUseCase, ClinicConfig, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::{
    appointment::{AppointmentOverview, ScheduleEntry},
    doctor::{DEFAULT_SPECIALTY, Doctor},
    patient::{NewPatient, PatientRecord},
    user::{NewUser, User},
};
use crate::domain::repository::{
    AppointmentRepository, DoctorRepository, PatientRepository, UserRepository,
};
use crate::domain::value_object::{
    credential::StoredPassword, role::Role, username::Username,
};
use crate::error::{ClinicError, ClinicResult};

// ============================================================================
// In-memory repository double
// ============================================================================

#[derive(Clone)]
struct UserRecord {
    id: i64,
    username: String,
    password: StoredPassword,
    role: Role,
}

#[derive(Clone)]
struct DoctorRecord {
    id: i64,
    name: String,
    specialty: String,
    user_id: Option<i64>,
}

#[derive(Clone)]
struct PatientRow {
    id: i64,
    name: String,
    age: u32,
    gender: String,
    #[allow(dead_code)]
    address: String,
    doctor_id: Option<i64>,
}

#[derive(Clone)]
struct AppointmentRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    appointment_time: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<UserRecord>,
    doctors: Vec<DoctorRecord>,
    patients: Vec<PatientRow>,
    appointments: Vec<AppointmentRow>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
struct MemoryClinic {
    state: Mutex<State>,
}

impl MemoryClinic {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    fn doctor_count(&self) -> usize {
        self.state.lock().unwrap().doctors.len()
    }

    fn appointment_count(&self) -> usize {
        self.state.lock().unwrap().appointments.len()
    }
}

impl UserRepository for MemoryClinic {
    async fn create(&self, user: &NewUser) -> ClinicResult<UserId> {
        // Single lock: both inserts land or neither, like the Postgres
        // transaction.
        let mut state = self.state.lock().unwrap();

        if state
            .users
            .iter()
            .any(|u| u.username == user.username.as_str())
        {
            return Err(ClinicError::UsernameTaken);
        }

        let user_id = state.next_id();
        state.users.push(UserRecord {
            id: user_id,
            username: user.username.as_str().to_string(),
            password: user.password.clone(),
            role: user.role,
        });

        if user.role == Role::Doctor {
            let doctor_id = state.next_id();
            state.doctors.push(DoctorRecord {
                id: doctor_id,
                name: user.username.as_str().to_string(),
                specialty: DEFAULT_SPECIALTY.to_string(),
                user_id: Some(user_id),
            });
        }

        Ok(Id::from_raw(user_id))
    }

    async fn find_by_username(&self, username: &Username) -> ClinicResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username.as_str())
            .map(|u| User {
                id: Id::from_raw(u.id),
                username: Username::from_db(&u.username),
                password: u.password.clone(),
                role: u.role,
            }))
    }
}

impl DoctorRepository for MemoryClinic {
    async fn add(&self, name: &str, specialty: &str) -> ClinicResult<DoctorId> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.doctors.push(DoctorRecord {
            id,
            name: name.to_string(),
            specialty: specialty.to_string(),
            user_id: None,
        });
        Ok(Id::from_raw(id))
    }

    async fn list(&self) -> ClinicResult<Vec<Doctor>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .doctors
            .iter()
            .map(|d| Doctor {
                id: Id::from_raw(d.id),
                name: d.name.clone(),
                specialty: d.specialty.clone(),
                user_id: d.user_id.map(Id::from_raw),
            })
            .collect())
    }

    async fn delete(&self, id: DoctorId) -> ClinicResult<()> {
        let mut state = self.state.lock().unwrap();
        // Dependent patients and appointments are left untouched.
        state.doctors.retain(|d| d.id != id.as_i64());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> ClinicResult<Option<DoctorId>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .doctors
            .iter()
            .find(|d| d.user_id == Some(user_id.as_i64()))
            .map(|d| Id::from_raw(d.id)))
    }
}

impl PatientRepository for MemoryClinic {
    async fn add(&self, patient: &NewPatient) -> ClinicResult<PatientId> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.patients.push(PatientRow {
            id,
            name: patient.name.clone(),
            age: patient.age,
            gender: patient.gender.clone(),
            address: patient.address.clone(),
            doctor_id: patient.doctor_id.map(|d| d.as_i64()),
        });
        Ok(Id::from_raw(id))
    }

    async fn list(&self) -> ClinicResult<Vec<PatientRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .patients
            .iter()
            .map(|p| {
                // LEFT JOIN: a missing doctor leaves the fields empty
                let doctor = p
                    .doctor_id
                    .and_then(|did| state.doctors.iter().find(|d| d.id == did));
                PatientRecord {
                    id: Id::from_raw(p.id),
                    name: p.name.clone(),
                    age: p.age,
                    gender: p.gender.clone(),
                    doctor_name: doctor.map(|d| d.name.clone()),
                    doctor_specialty: doctor.map(|d| d.specialty.clone()),
                }
            })
            .collect())
    }

    async fn delete(&self, id: PatientId) -> ClinicResult<()> {
        let mut state = self.state.lock().unwrap();
        state.patients.retain(|p| p.id != id.as_i64());
        Ok(())
    }
}

impl AppointmentRepository for MemoryClinic {
    async fn book(
        &self,
        patient_id: PatientId,
        doctor_id: DoctorId,
        appointment_time: DateTime<Utc>,
    ) -> ClinicResult<AppointmentId> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.appointments.push(AppointmentRow {
            id,
            patient_id: patient_id.as_i64(),
            doctor_id: doctor_id.as_i64(),
            appointment_time,
        });
        Ok(Id::from_raw(id))
    }

    async fn delete(&self, id: AppointmentId) -> ClinicResult<()> {
        let mut state = self.state.lock().unwrap();
        state.appointments.retain(|a| a.id != id.as_i64());
        Ok(())
    }

    async fn list_by_doctor(&self, doctor_id: DoctorId) -> ClinicResult<Vec<ScheduleEntry>> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<ScheduleEntry> = state
            .appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id.as_i64())
            .filter_map(|a| {
                // JOIN patients: an appointment whose patient is gone drops out
                let patient = state.patients.iter().find(|p| p.id == a.patient_id)?;
                Some(ScheduleEntry {
                    id: Id::from_raw(a.id),
                    patient_name: patient.name.clone(),
                    appointment_time: a.appointment_time,
                })
            })
            .collect();
        entries.sort_by_key(|e| e.appointment_time);
        Ok(entries)
    }

    async fn list_all(&self) -> ClinicResult<Vec<AppointmentOverview>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<AppointmentOverview> = state
            .appointments
            .iter()
            .filter_map(|a| {
                let patient = state.patients.iter().find(|p| p.id == a.patient_id)?;
                let doctor = state.doctors.iter().find(|d| d.id == a.doctor_id)?;
                Some(AppointmentOverview {
                    id: Id::from_raw(a.id),
                    patient_name: patient.name.clone(),
                    doctor_name: doctor.name.clone(),
                    appointment_time: a.appointment_time,
                })
            })
            .collect();
        rows.sort_by_key(|r| r.appointment_time);
        Ok(rows)
    }
}

// ============================================================================
// Helpers
//
// `add`, `list`, and `delete` exist on more than one repository trait, so the
// helpers pin the trait explicitly.
// ============================================================================

fn use_cases(
    store: &Arc<MemoryClinic>,
) -> (
    RegisterUseCase<MemoryClinic>,
    AuthenticateUseCase<MemoryClinic>,
) {
    let config = Arc::new(ClinicConfig::default());
    (
        RegisterUseCase::new(Arc::clone(store), Arc::clone(&config)),
        AuthenticateUseCase::new(Arc::clone(store), config),
    )
}

fn register_input(username: &str, password: &str, role: Role) -> RegisterInput {
    RegisterInput {
        username: username.to_string(),
        password: password.to_string(),
        role,
    }
}

fn login_input(username: &str, password: &str) -> AuthenticateInput {
    AuthenticateInput {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 10, hour, minute, 0).unwrap()
}

async fn add_doctor(store: &Arc<MemoryClinic>, name: &str, specialty: &str) -> DoctorId {
    DoctorRepository::add(store.as_ref(), name, specialty)
        .await
        .unwrap()
}

async fn add_patient(store: &Arc<MemoryClinic>, name: &str, doctor_id: Option<DoctorId>) -> PatientId {
    PatientRepository::add(
        store.as_ref(),
        &NewPatient {
            name: name.to_string(),
            age: 30,
            gender: "Male".to_string(),
            address: "123 St".to_string(),
            doctor_id,
        },
    )
    .await
    .unwrap()
}

async fn list_doctors(store: &Arc<MemoryClinic>) -> Vec<Doctor> {
    DoctorRepository::list(store.as_ref()).await.unwrap()
}

async fn list_patients(store: &Arc<MemoryClinic>) -> Vec<PatientRecord> {
    PatientRepository::list(store.as_ref()).await.unwrap()
}

// ============================================================================
// Registration and authentication
// ============================================================================

#[tokio::test]
async fn register_then_authenticate_round_trip() {
    let store = MemoryClinic::new();
    let (register, authenticate) = use_cases(&store);

    let user_id = register
        .execute(register_input("alice", "pw123", Role::Doctor))
        .await
        .unwrap();

    let session = authenticate
        .execute(login_input("alice", "pw123"))
        .await
        .unwrap()
        .expect("correct credentials should authenticate");
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.role, Role::Doctor);

    let denied = authenticate
        .execute(login_input("alice", "wrong"))
        .await
        .unwrap();
    assert!(denied.is_none(), "wrong password is a negative result");
}

#[tokio::test]
async fn authenticate_unknown_username_is_negative_not_error() {
    let store = MemoryClinic::new();
    let (_, authenticate) = use_cases(&store);

    let result = authenticate
        .execute(login_input("nobody", "pw123"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn register_blank_username_fails_validation() {
    let store = MemoryClinic::new();
    let (register, _) = use_cases(&store);

    let err = register
        .execute(register_input("   ", "pw123", Role::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::EmptyUsername));
    assert_eq!(err.kind(), kernel::error::kind::ErrorKind::Validation);
    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn duplicate_username_conflicts_without_partial_state() {
    let store = MemoryClinic::new();
    let (register, _) = use_cases(&store);

    register
        .execute(register_input("bob", "pw123", Role::Doctor))
        .await
        .unwrap();

    let err = register
        .execute(register_input("bob", "other", Role::Doctor))
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::UsernameTaken));
    assert_eq!(err.kind(), kernel::error::kind::ErrorKind::Conflict);

    // No second user row and no orphaned doctor row
    assert_eq!(store.user_count(), 1);
    assert_eq!(store.doctor_count(), 1);
}

#[tokio::test]
async fn doctor_registration_creates_linked_doctor_row() {
    let store = MemoryClinic::new();
    let (register, _) = use_cases(&store);

    let user_id = register
        .execute(register_input("carol", "pw123", Role::Doctor))
        .await
        .unwrap();

    let doctor_id = store
        .find_by_user_id(user_id)
        .await
        .unwrap()
        .expect("registration should have linked a doctor row");

    let doctors = list_doctors(&store).await;
    let row = doctors.iter().find(|d| d.id == doctor_id).unwrap();
    assert_eq!(row.name, "carol");
    assert_eq!(row.specialty, DEFAULT_SPECIALTY);
    assert_eq!(row.user_id, Some(user_id));
}

#[tokio::test]
async fn non_doctor_registration_creates_no_doctor_row() {
    let store = MemoryClinic::new();
    let (register, _) = use_cases(&store);

    let user_id = register
        .execute(register_input("dora", "pw123", Role::Receptionist))
        .await
        .unwrap();

    assert_eq!(store.doctor_count(), 0);
    assert!(store.find_by_user_id(user_id).await.unwrap().is_none());
}

// ============================================================================
// Doctors and patients
// ============================================================================

#[tokio::test]
async fn duplicate_doctor_names_are_permitted() {
    let store = MemoryClinic::new();

    let first = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    let second = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    assert_ne!(first, second);
    assert_eq!(store.doctor_count(), 2);
}

#[tokio::test]
async fn delete_missing_doctor_is_a_noop() {
    let store = MemoryClinic::new();
    add_doctor(&store, "Dr. Lee", "Cardiology").await;

    DoctorRepository::delete(store.as_ref(), Id::from_raw(999))
        .await
        .unwrap();
    assert_eq!(store.doctor_count(), 1);
}

#[tokio::test]
async fn patient_list_left_joins_assigned_doctor() {
    let store = MemoryClinic::new();
    let doctor_id = add_doctor(&store, "Dr. Lee", "Cardiology").await;

    add_patient(&store, "Bob", Some(doctor_id)).await;
    add_patient(&store, "Eve", None).await;

    let records = list_patients(&store).await;
    assert_eq!(records.len(), 2);

    let bob = records.iter().find(|r| r.name == "Bob").unwrap();
    assert_eq!(bob.age, 30);
    assert_eq!(bob.doctor_name.as_deref(), Some("Dr. Lee"));
    assert_eq!(bob.doctor_specialty.as_deref(), Some("Cardiology"));

    let eve = records.iter().find(|r| r.name == "Eve").unwrap();
    assert!(eve.doctor_name.is_none());
    assert!(eve.doctor_specialty.is_none());
}

#[tokio::test]
async fn deleting_a_doctor_leaves_dependent_rows_orphaned() {
    let store = MemoryClinic::new();
    let doctor_id = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    let patient_id = add_patient(&store, "Bob", Some(doctor_id)).await;
    store.book(patient_id, doctor_id, at(9, 0)).await.unwrap();

    DoctorRepository::delete(store.as_ref(), doctor_id)
        .await
        .unwrap();

    // Patient row survives; the left join now shows empty doctor fields
    let records = list_patients(&store).await;
    let bob = records.iter().find(|r| r.name == "Bob").unwrap();
    assert!(bob.doctor_name.is_none());

    // The appointment row survives too and is still reachable by doctor id
    assert_eq!(store.appointment_count(), 1);
    let schedule = store.list_by_doctor(doctor_id).await.unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].patient_name, "Bob");
}

#[tokio::test]
async fn delete_missing_patient_is_a_noop() {
    let store = MemoryClinic::new();
    PatientRepository::delete(store.as_ref(), Id::from_raw(42))
        .await
        .unwrap();
    assert!(list_patients(&store).await.is_empty());
}

// ============================================================================
// Appointments
// ============================================================================

#[tokio::test]
async fn schedule_is_filtered_by_doctor_and_sorted_by_time() {
    let store = MemoryClinic::new();
    let lee = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    let may = add_doctor(&store, "Dr. May", "Dermatology").await;
    let patient = add_patient(&store, "Bob", None).await;

    // Booked out of order on purpose
    store.book(patient, lee, at(14, 0)).await.unwrap();
    store.book(patient, may, at(8, 0)).await.unwrap();
    store.book(patient, lee, at(9, 30)).await.unwrap();

    let schedule = store.list_by_doctor(lee).await.unwrap();
    assert_eq!(schedule.len(), 2);
    assert!(
        schedule
            .windows(2)
            .all(|w| w[0].appointment_time <= w[1].appointment_time),
        "schedule must be non-decreasing by time"
    );
    assert_eq!(schedule[0].appointment_time, at(9, 30));
}

#[tokio::test]
async fn list_all_joins_names_and_sorts_by_time() {
    let store = MemoryClinic::new();
    let lee = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    let bob = add_patient(&store, "Bob", None).await;
    let eve = add_patient(&store, "Eve", None).await;

    store.book(eve, lee, at(16, 0)).await.unwrap();
    store.book(bob, lee, at(10, 0)).await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].patient_name, "Bob");
    assert_eq!(all[0].doctor_name, "Dr. Lee");
    assert_eq!(all[1].patient_name, "Eve");
    assert!(all[0].appointment_time <= all[1].appointment_time);
}

#[tokio::test]
async fn double_booking_is_permitted() {
    let store = MemoryClinic::new();
    let lee = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    let bob = add_patient(&store, "Bob", None).await;

    let first = store.book(bob, lee, at(11, 0)).await.unwrap();
    let second = store.book(bob, lee, at(11, 0)).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(store.list_by_doctor(lee).await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_missing_appointment_is_a_noop() {
    let store = MemoryClinic::new();
    AppointmentRepository::delete(store.as_ref(), Id::from_raw(7))
        .await
        .unwrap();
    assert_eq!(store.appointment_count(), 0);
}

#[tokio::test]
async fn deleted_appointment_disappears_from_listings() {
    let store = MemoryClinic::new();
    let lee = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    let bob = add_patient(&store, "Bob", None).await;

    let id = store.book(bob, lee, at(11, 0)).await.unwrap();
    AppointmentRepository::delete(store.as_ref(), id)
        .await
        .unwrap();

    assert!(store.list_by_doctor(lee).await.unwrap().is_empty());
    assert!(store.list_all().await.unwrap().is_empty());
}

// ============================================================================
// Read-model serialization (consumed by the presentation layer)
// ============================================================================

#[tokio::test]
async fn patient_record_serializes_for_rendering() {
    let store = MemoryClinic::new();
    let lee = add_doctor(&store, "Dr. Lee", "Cardiology").await;
    add_patient(&store, "Bob", Some(lee)).await;

    let records = list_patients(&store).await;
    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["name"], "Bob");
    assert_eq!(json["age"], 30);
    assert_eq!(json["doctor_name"], "Dr. Lee");
}
