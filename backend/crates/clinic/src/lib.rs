//! Clinic (Hospital Administration) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, authorization
//! - `application/` - Use cases and configuration
//! - `infra/` - Database implementations
//!
//! The presentation layer (forms, menus, tables) lives outside this crate:
//! it collects input, calls a repository or use case, and renders the typed
//! rows that come back.
//!
//! ## Features
//! - User registration/login with username + password
//! - Role-based access (Admin, Doctor, Receptionist) via an explicit
//!   [`domain::session::Session`] value — no ambient login state
//! - Doctor, patient, and appointment records over a four-table schema
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; only the salted PHC string is stored
//! - Registering a doctor account creates the linked doctor row in the same
//!   transaction — both rows or neither
//! - A failed login is a normal negative result, never an error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::ClinicConfig;
pub use error::{ClinicError, ClinicResult};
pub use infra::postgres::PgClinicRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod store {
    pub use crate::infra::postgres::PgClinicRepository as ClinicStore;
    pub use crate::infra::schema::{POSTGRES_INIT, init_schema};
}

#[cfg(test)]
mod tests;
