//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use kernel::id::{AppointmentId, DoctorId, Id, PatientId, UserId};

use crate::application::config::ClinicConfig;
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

/// PostgreSQL-backed clinic repository
///
/// One pooled connection per unit of work: each call acquires, executes a
/// single statement (or the registration transaction), commits, and releases
/// before returning. No transaction outlives a call.
#[derive(Clone)]
pub struct PgClinicRepository {
    pool: PgPool,
}

impl PgClinicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using the configured URL and pool size
    pub async fn connect(config: &ClinicConfig) -> ClinicResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a unique-constraint violation on insert to the Conflict variant
fn map_insert_error(err: sqlx::Error) -> ClinicError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return ClinicError::UsernameTaken;
        }
    }
    ClinicError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgClinicRepository {
    async fn create(&self, user: &NewUser) -> ClinicResult<UserId> {
        // Registration is the only multi-statement operation: the user row
        // and (for doctors) the linked doctor row share one transaction.
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password, role)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role.code())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        if user.role == Role::Doctor {
            sqlx::query(
                r#"
                INSERT INTO doctors (name, specialty, user_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(user.username.as_str())
            .bind(DEFAULT_SPECIALTY)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Id::from_raw(user_id))
    }

    async fn find_by_username(&self, username: &Username) -> ClinicResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// Doctor Repository Implementation
// ============================================================================

impl DoctorRepository for PgClinicRepository {
    async fn add(&self, name: &str, specialty: &str) -> ClinicResult<DoctorId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO doctors (name, specialty)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(specialty)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(doctor_id = id, "Doctor added");

        Ok(Id::from_raw(id))
    }

    async fn list(&self) -> ClinicResult<Vec<Doctor>> {
        let rows = sqlx::query_as::<_, DoctorRow>(
            r#"
            SELECT id, name, specialty, user_id
            FROM doctors
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DoctorRow::into_doctor).collect())
    }

    async fn delete(&self, id: DoctorId) -> ClinicResult<()> {
        // Missing id: zero rows affected, still Ok. Dependent patients and
        // appointments are left untouched.
        let deleted = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(doctor_id = %id, deleted, "Doctor delete");

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> ClinicResult<Option<DoctorId>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM doctors WHERE user_id = $1")
            .bind(user_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(id.map(Id::from_raw))
    }
}

// ============================================================================
// Patient Repository Implementation
// ============================================================================

impl PatientRepository for PgClinicRepository {
    async fn add(&self, patient: &NewPatient) -> ClinicResult<PatientId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO patients (name, age, gender, address, doctor_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&patient.name)
        .bind(patient.age as i32)
        .bind(&patient.gender)
        .bind(&patient.address)
        .bind(patient.doctor_id.map(|d| d.as_i64()))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(patient_id = id, "Patient added");

        Ok(Id::from_raw(id))
    }

    async fn list(&self) -> ClinicResult<Vec<PatientRecord>> {
        let rows = sqlx::query_as::<_, PatientRecordRow>(
            r#"
            SELECT
                p.id,
                p.name,
                p.age,
                p.gender,
                d.name AS doctor_name,
                d.specialty AS doctor_specialty
            FROM patients p
            LEFT JOIN doctors d ON p.doctor_id = d.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_record()).collect()
    }

    async fn delete(&self, id: PatientId) -> ClinicResult<()> {
        let deleted = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(patient_id = %id, deleted, "Patient delete");

        Ok(())
    }
}

// ============================================================================
// Appointment Repository Implementation
// ============================================================================

impl AppointmentRepository for PgClinicRepository {
    async fn book(
        &self,
        patient_id: PatientId,
        doctor_id: DoctorId,
        appointment_time: DateTime<Utc>,
    ) -> ClinicResult<AppointmentId> {
        // No overlap check: double-booking is permitted.
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO appointments (patient_id, doctor_id, appointment_time)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(patient_id.as_i64())
        .bind(doctor_id.as_i64())
        .bind(appointment_time)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            appointment_id = id,
            patient_id = %patient_id,
            doctor_id = %doctor_id,
            "Appointment booked"
        );

        Ok(Id::from_raw(id))
    }

    async fn delete(&self, id: AppointmentId) -> ClinicResult<()> {
        let deleted = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(appointment_id = %id, deleted, "Appointment delete");

        Ok(())
    }

    async fn list_by_doctor(&self, doctor_id: DoctorId) -> ClinicResult<Vec<ScheduleEntry>> {
        let rows = sqlx::query_as::<_, ScheduleEntryRow>(
            r#"
            SELECT a.id, p.name AS patient_name, a.appointment_time
            FROM appointments a
            JOIN patients p ON a.patient_id = p.id
            WHERE a.doctor_id = $1
            ORDER BY a.appointment_time ASC
            "#,
        )
        .bind(doctor_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ScheduleEntryRow::into_entry).collect())
    }

    async fn list_all(&self) -> ClinicResult<Vec<AppointmentOverview>> {
        let rows = sqlx::query_as::<_, AppointmentOverviewRow>(
            r#"
            SELECT
                a.id,
                p.name AS patient_name,
                d.name AS doctor_name,
                a.appointment_time
            FROM appointments a
            JOIN patients p ON a.patient_id = p.id
            JOIN doctors d ON a.doctor_id = d.id
            ORDER BY a.appointment_time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(AppointmentOverviewRow::into_overview)
            .collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    role: String,
}

impl UserRow {
    fn into_user(self) -> ClinicResult<User> {
        let role = Role::from_code(&self.role)
            .ok_or_else(|| ClinicError::Internal(format!("Invalid role code: {}", self.role)))?;

        let password = StoredPassword::from_phc_string(self.password)
            .map_err(|e| ClinicError::Internal(e.to_string()))?;

        Ok(User {
            id: Id::from_raw(self.id),
            username: Username::from_db(&self.username),
            password,
            role,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DoctorRow {
    id: i64,
    name: String,
    specialty: String,
    user_id: Option<i64>,
}

impl DoctorRow {
    fn into_doctor(self) -> Doctor {
        Doctor {
            id: Id::from_raw(self.id),
            name: self.name,
            specialty: self.specialty,
            user_id: self.user_id.map(Id::from_raw),
        }
    }
}

#[derive(sqlx::FromRow)]
struct PatientRecordRow {
    id: i64,
    name: String,
    age: i32,
    gender: String,
    doctor_name: Option<String>,
    doctor_specialty: Option<String>,
}

impl PatientRecordRow {
    fn into_record(self) -> ClinicResult<PatientRecord> {
        let age = u32::try_from(self.age)
            .map_err(|_| ClinicError::Internal(format!("Negative age in row {}", self.id)))?;

        Ok(PatientRecord {
            id: Id::from_raw(self.id),
            name: self.name,
            age,
            gender: self.gender,
            doctor_name: self.doctor_name,
            doctor_specialty: self.doctor_specialty,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ScheduleEntryRow {
    id: i64,
    patient_name: String,
    appointment_time: DateTime<Utc>,
}

impl ScheduleEntryRow {
    fn into_entry(self) -> ScheduleEntry {
        ScheduleEntry {
            id: Id::from_raw(self.id),
            patient_name: self.patient_name,
            appointment_time: self.appointment_time,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AppointmentOverviewRow {
    id: i64,
    patient_name: String,
    doctor_name: String,
    appointment_time: DateTime<Utc>,
}

impl AppointmentOverviewRow {
    fn into_overview(self) -> AppointmentOverview {
        AppointmentOverview {
            id: Id::from_raw(self.id),
            patient_name: self.patient_name,
            doctor_name: self.doctor_name,
            appointment_time: self.appointment_time,
        }
    }
}
