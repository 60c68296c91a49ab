//! Entity Module
//!
//! Row-backed entities and the joined read models the presentation layer
//! renders as tables.

pub mod appointment;
pub mod doctor;
pub mod patient;
pub mod user;
