//! Inspect Domain Layer
//!
//! Core model for domain classification and API access gating. This crate
//! defines the value types and collaborator traits that every other layer
//! depends upon; it has no runtime or I/O dependencies.
//!
//! ## Key Concepts
//!
//! - **Classification**: the blacklist / whitelist / undefined verdict for a domain
//! - **Match kind**: how a stored record matches an input (equals, prefix, suffix, contains)
//! - **Domain record**: a stored pattern with its classification and match kind
//! - **Access grant**: a subscription token with its expiry
//!
//! ## Architecture
//!
//! - Pure business types only
//! - Infrastructure implementations live in `inspect-store` and `inspect-lookup`
//! - Trait definitions for every external interaction live in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod error;
pub mod grant;
pub mod name;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use classification::Classification;
pub use error::ErrorKind;
pub use grant::{token_hint, AccessGrant, SubscriptionType};
pub use name::{DomainName, InputError};
pub use record::{DomainRecord, MatchKind};
pub use traits::{AccessStore, Created, LookupRequest, LookupResponse, MatchStore, RemoteLookup};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as seconds since the Unix epoch.
///
/// Timestamps across the domain model (`created_at`, `access_expiry`, ...)
/// are stored in this representation.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
