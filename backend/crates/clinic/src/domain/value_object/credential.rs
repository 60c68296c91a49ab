//! Credential Value Objects
//!
//! Domain wrappers around `platform::password`. The raw password exists only
//! long enough to be hashed or verified; the stored form is the salted
//! Argon2id PHC string that goes into the `users.password` column.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword`; memory is zeroized on drop. No policy
/// is imposed — the original forms accepted any password.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password (NFKC-normalized, never fails)
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Stored Password (Hashed, for the users table)
// ============================================================================

/// Hashed password as stored in the `users.password` column
///
/// Argon2id PHC string with the salt embedded, so verification needs no
/// separate salt storage. Safe to store and to appear in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredPassword(HashedPassword);

impl StoredPassword {
    /// Create from raw password by hashing
    ///
    /// A fresh salt is generated per call, so registering the same password
    /// twice stores two different strings.
    ///
    /// ## Arguments
    /// * `raw` - The raw password
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// Constant-time comparison; `false` for any mismatch, never an error.
    ///
    /// ## Arguments
    /// * `raw` - The raw password to verify
    /// * `pepper` - Must match the pepper used during hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
