//! Value Object Module

pub mod credential;
pub mod role;
pub mod username;
