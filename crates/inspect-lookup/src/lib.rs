//! Inspect Remote Lookup Layer
//!
//! Implementations of the `RemoteLookup` trait from `inspect-domain`.
//!
//! # Clients
//!
//! - [`HttpLookupClient`]: JSON over HTTP against the remote classification service
//! - [`MockLookup`]: deterministic stand-in for tests, with optional latency
//!
//! # Examples
//!
//! ```
//! use inspect_domain::{LookupRequest, RemoteLookup};
//! use inspect_lookup::MockLookup;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let lookup = MockLookup::new("blacklist");
//!     let request = LookupRequest {
//!         domain: "spam.example".to_string(),
//!         client_ip: "127.0.0.1".parse().unwrap(),
//!     };
//!     let response = lookup.classify(request).await.unwrap();
//!     assert_eq!(response.classification, "blacklist");
//! });
//! ```

#![warn(missing_docs)]

pub mod http;
pub mod mock;

pub use http::HttpLookupClient;
pub use mock::MockLookup;

use thiserror::Error;

/// Errors that can occur while talking to the remote service
#[derive(Error, Debug)]
pub enum LookupError {
    /// Could not reach the service
    #[error("Connection error: {0}")]
    Connection(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request exceeded the client's own timeout
    #[error("Request timed out")]
    Timeout,

    /// Client could not be constructed
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else if e.is_connect() {
            LookupError::Connection(e.to_string())
        } else if e.is_decode() {
            LookupError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            LookupError::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            LookupError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

impl LookupError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            LookupError::Connection(_) | LookupError::Timeout => true,
            LookupError::Status { status, .. } => *status >= 500,
            LookupError::InvalidResponse(_) | LookupError::Config(_) => false,
        }
    }
}
