//! Error types for access operations

use inspect_domain::ErrorKind;
use thiserror::Error;

/// Errors that can occur while authorizing or provisioning a token
#[derive(Error, Debug)]
pub enum AccessError {
    /// Token was empty
    #[error("Access token is missing")]
    InvalidToken,

    /// No grant exists for the token
    #[error("Unknown access token {hint}")]
    TokenNotFound {
        /// Shortened token for logs
        hint: String,
    },

    /// The grant exists but its subscription has lapsed
    #[error("Subscription for token {hint} expired at {expired_at}")]
    SubscriptionNotActive {
        /// Shortened token for logs
        hint: String,
        /// Expiry as Unix seconds
        expired_at: u64,
    },

    /// Access store failure
    #[error("Storage error: {0}")]
    Store(String),
}

impl AccessError {
    /// User-facing error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::InvalidToken | AccessError::TokenNotFound { .. } => {
                ErrorKind::Unauthenticated
            }
            AccessError::SubscriptionNotActive { .. } => ErrorKind::PermissionDenied,
            AccessError::Store(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to show at the API boundary
    pub fn public_message(&self) -> String {
        match self {
            AccessError::InvalidToken | AccessError::TokenNotFound { .. } => {
                "invalid access token".to_string()
            }
            AccessError::SubscriptionNotActive { .. } => "subscription not active".to_string(),
            AccessError::Store(_) => "access check is temporarily unavailable".to_string(),
        }
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is out of range
    #[error("Configuration error: {0}")]
    Invalid(String),
}
