//! Error types for classification

use inspect_domain::{ErrorKind, InputError};
use thiserror::Error;

/// Errors from `MatchResolver`
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Every match lookup failed; carries the last store error text
    #[error("All match lookups failed for {domain}: {last_error}")]
    AllLookupsFailed {
        /// Domain being resolved
        domain: String,
        /// Error reported by the last failing lookup
        last_error: String,
    },
}

/// Errors surfaced by `ClassificationUsecase::classify`
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The input is not a usable email address or domain
    #[error(transparent)]
    Input(#[from] InputError),

    /// The store could not be read
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ClassifyError {
    /// User-facing error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifyError::Input(InputError::DomainRootNotFound(_)) => ErrorKind::NotFound,
            ClassifyError::Input(_) => ErrorKind::InvalidArgument,
            ClassifyError::Resolve(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to show at the API boundary
    pub fn public_message(&self) -> String {
        match self {
            ClassifyError::Input(e) => e.to_string(),
            ClassifyError::Resolve(_) => "classification is temporarily unavailable".to_string(),
        }
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is out of range or inconsistent with another
    #[error("Configuration error: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err = ClassifyError::from(InputError::Empty);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = ClassifyError::from(InputError::DomainRootNotFound("localhost".into()));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = ClassifyError::from(ResolveError::AllLookupsFailed {
            domain: "example.com".into(),
            last_error: "disk I/O error".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_store_text_not_public() {
        let err = ClassifyError::from(ResolveError::AllLookupsFailed {
            domain: "example.com".into(),
            last_error: "database is locked".into(),
        });
        assert!(!err.public_message().contains("locked"));
        assert!(err.to_string().contains("locked"));
    }
}
