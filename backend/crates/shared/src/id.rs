//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.
//!
//! Keys are generated by the relational store (`BIGSERIAL`), so unlike a
//! client-generated UUID there is no `new()` constructor: an `Id` only exists
//! once the store has handed one back.

use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper over a store-generated integer key
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type DoctorId = Id<markers::Doctor>;
/// let id = DoctorId::from_raw(42);
/// assert_eq!(id.as_i64(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a key returned by the store
    pub const fn from_raw(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derive would bound them on `T`, but the marker is phantom.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

// Manual serde impls for the same reason as above: no bound on the marker.
impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Doctor IDs
    pub struct Doctor;

    /// Marker for Patient IDs
    pub struct Patient;

    /// Marker for Appointment IDs
    pub struct Appointment;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type DoctorId = Id<markers::Doctor>;
pub type PatientId = Id<markers::Patient>;
pub type AppointmentId = Id<markers::Appointment>;
