//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum used across all domain crates.

use serde::Serialize;

/// Error classification
///
/// Every failure in the system falls into one of these categories. The
/// presentation layer decides how to render each kind; repositories and use
/// cases only classify.
///
/// ## Notes
/// * `non_exhaustive` - variants may be added in the future
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Conflict;
/// assert_eq!(kind.as_str(), "Conflict");
/// assert!(kind.is_user_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Bad input (e.g. a blank username)
    Validation,
    /// Uniqueness or state conflict surfaced by the store
    Conflict,
    /// Referenced record does not exist
    NotFound,
    /// Caller is not authenticated
    Unauthorized,
    /// Caller is authenticated but the role does not permit the operation
    Forbidden,
    /// Connectivity loss or query failure in the relational store
    Persistence,
    /// Invariant violation inside this layer
    Internal,
}

impl ErrorKind {
    /// Human-readable label for the kind
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Validation.as_str(), "Invalid Input");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Invalid Input",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Persistence => "Persistence Failure",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// Whether the failure originated in this system rather than user input
    ///
    /// System errors should be logged; user errors are surfaced back to the
    /// form that produced them.
    #[inline]
    pub const fn is_system_error(&self) -> bool {
        matches!(self, ErrorKind::Persistence | ErrorKind::Internal)
    }

    /// Whether the failure is attributable to the caller's input or role
    #[inline]
    pub const fn is_user_error(&self) -> bool {
        !self.is_system_error()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ErrorKind::Validation.as_str(), "Invalid Input");
        assert_eq!(ErrorKind::Conflict.as_str(), "Conflict");
        assert_eq!(ErrorKind::NotFound.as_str(), "Not Found");
        assert_eq!(ErrorKind::Unauthorized.as_str(), "Unauthorized");
        assert_eq!(ErrorKind::Forbidden.as_str(), "Forbidden");
        assert_eq!(ErrorKind::Persistence.as_str(), "Persistence Failure");
        assert_eq!(ErrorKind::Internal.as_str(), "Internal Error");
    }

    #[test]
    fn test_is_system_error() {
        assert!(!ErrorKind::Validation.is_system_error());
        assert!(!ErrorKind::Conflict.is_system_error());
        assert!(!ErrorKind::Forbidden.is_system_error());
        assert!(ErrorKind::Persistence.is_system_error());
        assert!(ErrorKind::Internal.is_system_error());
    }

    #[test]
    fn test_is_user_error() {
        assert!(ErrorKind::Validation.is_user_error());
        assert!(ErrorKind::NotFound.is_user_error());
        assert!(!ErrorKind::Persistence.is_user_error());
    }
}
