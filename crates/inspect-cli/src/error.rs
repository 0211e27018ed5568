//! Error types for the CLI application.

use inspect_access::AccessError;
use inspect_classifier::ClassifyError;
use inspect_domain::ErrorKind;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classification failed
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Authorization or provisioning failed
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Storage could not be opened
    #[error("Storage error: {0}")]
    Store(#[from] inspect_store::StoreError),

    /// Remote lookup client could not be built
    #[error("Lookup client error: {0}")]
    Lookup(#[from] inspect_lookup::LookupError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// User-facing error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Classify(e) => e.kind(),
            CliError::Access(e) => e.kind(),
            CliError::Config(_) | CliError::Toml(_) => ErrorKind::InvalidArgument,
            CliError::Store(_)
            | CliError::Lookup(_)
            | CliError::Io(_)
            | CliError::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Message printed to the user
    ///
    /// Usecase errors are reduced to their public message; setup errors are
    /// shown in full since the operator needs them.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Classify(e) => e.public_message(),
            CliError::Access(e) => e.public_message(),
            other => other.to_string(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Internal => 1,
            ErrorKind::InvalidArgument => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::Unauthenticated => 4,
            ErrorKind::PermissionDenied => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_domain::InputError;

    #[test]
    fn test_exit_codes_follow_kind() {
        let err = CliError::from(ClassifyError::from(InputError::Empty));
        assert_eq!(err.exit_code(), 2);

        let err = CliError::from(ClassifyError::from(InputError::DomainRootNotFound(
            "localhost".into(),
        )));
        assert_eq!(err.exit_code(), 3);

        let err = CliError::from(AccessError::TokenNotFound { hint: "abcd…".into() });
        assert_eq!(err.exit_code(), 4);

        let err = CliError::from(AccessError::SubscriptionNotActive {
            hint: "abcd…".into(),
            expired_at: 1,
        });
        assert_eq!(err.exit_code(), 5);

        let err = CliError::Config("bad".into());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_user_message_hides_store_text() {
        let err = CliError::from(AccessError::Store("database disk image is malformed".into()));
        assert_eq!(err.exit_code(), 1);
        assert!(!err.user_message().contains("malformed"));
    }
}
