//! Clinic Error Types
//!
//! This module provides clinic-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::session::Operation;
use crate::domain::value_object::role::Role;

/// Clinic-specific result type alias
pub type ClinicResult<T> = Result<T, ClinicError>;

/// Clinic-specific error variants
///
/// Deletes on missing ids and failed logins are NOT represented here: the
/// former are silent no-ops, the latter a normal `Ok(None)`.
#[derive(Debug, Error)]
pub enum ClinicError {
    /// Blank username at registration
    #[error("Username cannot be empty")]
    EmptyUsername,

    /// Username already exists (surfaced from the store's UNIQUE constraint)
    #[error("Username already exists")]
    UsernameTaken,

    /// Role does not permit the operation
    #[error("Role '{role}' is not permitted to {operation}")]
    NotAuthorized { role: Role, operation: Operation },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClinicError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClinicError::EmptyUsername => ErrorKind::Validation,
            ClinicError::UsernameTaken => ErrorKind::Conflict,
            ClinicError::NotAuthorized { .. } => ErrorKind::Forbidden,
            ClinicError::Database(_) => ErrorKind::Persistence,
            ClinicError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError for the presentation boundary
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    ///
    /// Call once at the boundary where the error is surfaced to the user.
    pub fn log(&self) {
        match self {
            ClinicError::Database(e) => {
                tracing::error!(error = %e, "Clinic database error");
            }
            ClinicError::Internal(msg) => {
                tracing::error!(message = %msg, "Clinic internal error");
            }
            ClinicError::NotAuthorized { role, operation } => {
                tracing::warn!(role = %role, operation = %operation, "Operation denied");
            }
            _ => {
                tracing::debug!(error = %self, "Clinic error");
            }
        }
    }
}

impl From<AppError> for ClinicError {
    fn from(err: AppError) -> Self {
        ClinicError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ClinicError::EmptyUsername.kind(), ErrorKind::Validation);
        assert_eq!(ClinicError::UsernameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            ClinicError::NotAuthorized {
                role: Role::Doctor,
                operation: Operation::DeletePatient,
            }
            .kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            ClinicError::Internal("boom".to_string()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_to_app_error() {
        let err = ClinicError::UsernameTaken.to_app_error();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Username already exists");
    }
}
