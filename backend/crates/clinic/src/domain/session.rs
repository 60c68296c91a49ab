//! Session and Authorization Gate
//!
//! A [`Session`] is the explicit value returned by a successful login. The
//! presentation layer holds it for the duration of the visit and passes it
//! back to [`Session::authorize`] before calling a repository; logging out
//! is simply dropping the value. There is no ambient login state and no
//! server-side session row.
//!
//! Authorization is a pure lookup: each role maps to a fixed slice of
//! permitted operations.

use kernel::id::UserId;
use serde::Serialize;
use std::fmt;

use crate::domain::value_object::role::Role;
use crate::error::{ClinicError, ClinicResult};

/// The closed set of operations a session can be authorized for
///
/// One variant per repository operation the presentation layer can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AddDoctor,
    ListDoctors,
    DeleteDoctor,
    AddPatient,
    ListPatients,
    DeletePatient,
    BookAppointment,
    DeleteAppointment,
    /// A doctor viewing their own schedule
    ViewOwnSchedule,
    ViewAllAppointments,
}

impl Operation {
    /// All operations, for exhaustive permission checks
    pub const ALL: [Operation; 10] = [
        Operation::AddDoctor,
        Operation::ListDoctors,
        Operation::DeleteDoctor,
        Operation::AddPatient,
        Operation::ListPatients,
        Operation::DeletePatient,
        Operation::BookAppointment,
        Operation::DeleteAppointment,
        Operation::ViewOwnSchedule,
        Operation::ViewAllAppointments,
    ];

    /// Short phrase used in denial messages
    pub const fn describe(&self) -> &'static str {
        use Operation::*;
        match self {
            AddDoctor => "add a doctor",
            ListDoctors => "list doctors",
            DeleteDoctor => "delete a doctor",
            AddPatient => "add a patient",
            ListPatients => "list patients",
            DeletePatient => "delete a patient",
            BookAppointment => "book an appointment",
            DeleteAppointment => "delete an appointment",
            ViewOwnSchedule => "view their schedule",
            ViewAllAppointments => "view all appointments",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl Role {
    /// The operations this role is permitted to perform
    ///
    /// Mirrors the per-role dashboards: admins curate records, receptionists
    /// enter them, doctors see their own schedule.
    pub const fn allowed_operations(&self) -> &'static [Operation] {
        use Operation::*;
        match self {
            Role::Admin => &[
                ListDoctors,
                DeleteDoctor,
                ListPatients,
                DeletePatient,
                ViewAllAppointments,
                DeleteAppointment,
            ],
            Role::Receptionist => &[
                AddDoctor,
                ListDoctors,
                AddPatient,
                ListPatients,
                BookAppointment,
                DeleteAppointment,
                ViewAllAppointments,
            ],
            Role::Doctor => &[ViewOwnSchedule],
        }
    }

    /// Whether this role may perform the operation
    pub fn permits(&self, operation: Operation) -> bool {
        self.allowed_operations().contains(&operation)
    }
}

/// An authenticated visit
///
/// Carries the identity and role established by login. Copy-cheap; passed by
/// value wherever an operation needs authorizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Whether this session may perform the operation
    pub fn permits(&self, operation: Operation) -> bool {
        self.role.permits(operation)
    }

    /// Authorize the operation, or fail with a Forbidden-kinded error
    pub fn authorize(&self, operation: Operation) -> ClinicResult<()> {
        if self.permits(operation) {
            Ok(())
        } else {
            Err(ClinicError::NotAuthorized {
                role: self.role,
                operation,
            })
        }
    }
}
