//! User-facing error kinds
//!
//! Internal failures are logged with full context at the point they occur and
//! then reduced to one of these kinds before crossing the API boundary.

use std::fmt;

/// Closed set of error kinds surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed email or domain syntax; not retryable
    InvalidArgument,

    /// Input has no registrable domain root
    NotFound,

    /// Token is missing or unknown
    Unauthenticated,

    /// Token is known but its subscription is not active
    PermissionDenied,

    /// Store or other internal failure
    Internal,
}

impl ErrorKind {
    /// Get the kind as a stable string code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::Internal => "internal",
        }
    }

    /// Whether the caller caused the error
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
