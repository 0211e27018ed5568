//! Trait definitions for external interactions
//!
//! These traits define the boundaries between classification/access logic and
//! infrastructure. Implementations live in other crates (`inspect-store`,
//! `inspect-lookup`) or in test stubs.
//!
//! Methods return `impl Future + Send` so implementors can write plain
//! `async fn` bodies while callers remain free to spawn the futures.

use crate::{AccessGrant, DomainRecord};
use std::future::Future;
use std::net::IpAddr;

/// Outcome of inserting a domain record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    /// A new record was written
    Inserted,
    /// A stored `undefined` record with the same `(name, match_kind)` took
    /// the new classification
    Replaced,
    /// A record with the same `(name, match_kind)` already existed and was kept
    AlreadyExists,
}

/// Keyed store of domain records exposing point-lookup predicates
///
/// Each predicate returns the record of that match kind which matches `name`,
/// or `None`. When several records of one kind match, the implementation picks
/// one deterministically.
pub trait MatchStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Record whose pattern equals `name`
    fn match_equals(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DomainRecord>, Self::Error>> + Send;

    /// Record whose pattern is a prefix of `name`
    fn match_prefix(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DomainRecord>, Self::Error>> + Send;

    /// Record whose pattern is a suffix of `name`
    fn match_suffix(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DomainRecord>, Self::Error>> + Send;

    /// Record whose pattern occurs anywhere in `name`
    fn match_contains(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DomainRecord>, Self::Error>> + Send;

    /// Insert a record; an existing `(name, match_kind)` is left untouched
    fn create(
        &self,
        record: DomainRecord,
    ) -> impl Future<Output = Result<Created, Self::Error>> + Send;
}

/// Durable store of access grants
pub trait AccessStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get the grant for a token
    fn get(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<AccessGrant>, Self::Error>> + Send;

    /// Create or replace the grant for `grant.token`
    fn create(&self, grant: AccessGrant) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Remote classification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Domain to classify
    pub domain: String,
    /// Address of the client that asked
    pub client_ip: IpAddr,
}

/// Remote classification response
///
/// The classification is kept as the raw string the service returned;
/// validating it is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    /// Raw classification name
    pub classification: String,
}

/// Remote classification service
pub trait RemoteLookup: Send + Sync {
    /// Error type for transport and protocol failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Ask the remote service to classify a domain
    fn classify(
        &self,
        request: LookupRequest,
    ) -> impl Future<Output = Result<LookupResponse, Self::Error>> + Send;
}
