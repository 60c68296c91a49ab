//! Relational schema for the clinic backend.
//!
//! Four tables; the column set is the compatibility contract with the
//! existing deployment. No foreign-key constraints: deleting a doctor must
//! leave dependent patients and appointments untouched (orphans are
//! accepted), and an FK would block exactly that.

use sqlx::PgPool;

use crate::error::ClinicResult;

/// DDL executed by [`init_schema`]
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS doctors (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    specialty TEXT NOT NULL,
    user_id BIGINT
);

CREATE TABLE IF NOT EXISTS patients (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    address TEXT NOT NULL,
    doctor_id BIGINT
);

CREATE TABLE IF NOT EXISTS appointments (
    id BIGSERIAL PRIMARY KEY,
    patient_id BIGINT NOT NULL,
    doctor_id BIGINT NOT NULL,
    appointment_time TIMESTAMPTZ NOT NULL
);
"#;

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &PgPool) -> ClinicResult<()> {
    // sqlx::query takes one statement at a time
    for stmt in POSTGRES_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
