//! Role Value Object
//!
//! Closed set of staff roles. Stored in the `users.role` column as the
//! string code, matching the registration forms.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Receptionist,
}

impl Role {
    /// All roles, in display order
    pub const ALL: [Role; 3] = [Role::Admin, Role::Doctor, Role::Receptionist];

    /// Stable string code, as stored in the `users.role` column
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Admin => "admin",
            Doctor => "doctor",
            Receptionist => "receptionist",
        }
    }

    /// Parse a stored role code
    ///
    /// Returns `None` for anything outside the closed set; the caller
    /// decides how to surface a corrupt row.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "admin" => Some(Admin),
            "doctor" => Some(Doctor),
            "receptionist" => Some(Receptionist),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
