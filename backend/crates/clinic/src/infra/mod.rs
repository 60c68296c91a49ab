//! Infrastructure Layer
//!
//! Database implementations.

pub mod postgres;
pub mod schema;

pub use postgres::PgClinicRepository;
