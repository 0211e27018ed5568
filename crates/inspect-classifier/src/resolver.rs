//! Local match resolution
//!
//! The four match lookups run concurrently, but the answer is only chosen
//! once every lookup has finished. Precedence is fixed:
//! Equals > Prefix > Suffix > Contains.

use crate::ResolveError;
use inspect_domain::{Classification, DomainName, DomainRecord, MatchKind, MatchStore};
use std::sync::Arc;

/// Outcome of a local resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Classification of the winning record, or `Undefined`
    pub classification: Classification,

    /// Winning record, if any lookup matched
    pub record: Option<DomainRecord>,

    /// Number of lookups that failed and were treated as not found
    pub failed_lookups: usize,
}

impl Resolution {
    /// Match kind of the winning record
    pub fn match_kind(&self) -> Option<MatchKind> {
        self.record.as_ref().map(|r| r.match_kind)
    }
}

/// Runs the match lookups for one domain and applies precedence
pub struct MatchResolver<S> {
    store: Arc<S>,
}

impl<S> Clone for MatchResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MatchStore> MatchResolver<S> {
    /// Create a resolver over `store`
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve a validated domain against the store
    ///
    /// A failing lookup is logged and counted as not found. Only when all
    /// four fail does the call return an error. Dropping the returned future
    /// abandons every lookup still in flight.
    pub async fn resolve(&self, domain: &DomainName) -> Result<Resolution, ResolveError> {
        let name = domain.as_str();

        let (equals, prefix, suffix, contains) = tokio::join!(
            self.store.match_equals(name),
            self.store.match_prefix(name),
            self.store.match_suffix(name),
            self.store.match_contains(name),
        );

        // Same order as MatchKind::BY_PRECEDENCE
        let outcomes = [
            (MatchKind::Equals, equals),
            (MatchKind::Prefix, prefix),
            (MatchKind::Suffix, suffix),
            (MatchKind::Contains, contains),
        ];

        let mut winner: Option<DomainRecord> = None;
        let mut failed_lookups = 0;
        let mut last_error = None;

        for (kind, outcome) in outcomes {
            match outcome {
                Ok(Some(record)) => {
                    if winner.is_none() {
                        winner = Some(record);
                    } else {
                        tracing::trace!(
                            domain = %name,
                            match_kind = %kind,
                            pattern = %record.name,
                            "Shadowed by a more specific match"
                        );
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        domain = %name,
                        match_kind = %kind,
                        error = %e,
                        "Match lookup failed, treating as not found"
                    );
                    failed_lookups += 1;
                    last_error = Some(e.to_string());
                }
            }
        }

        if failed_lookups == MatchKind::BY_PRECEDENCE.len() {
            return Err(ResolveError::AllLookupsFailed {
                domain: name.to_string(),
                last_error: last_error.unwrap_or_default(),
            });
        }

        let classification = winner
            .as_ref()
            .map(|r| r.classification)
            .unwrap_or_default();

        Ok(Resolution {
            classification,
            record: winner,
            failed_lookups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_store::MemoryStore;

    fn domain(s: &str) -> DomainName {
        DomainName::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_no_match_is_undefined() {
        let resolver = MatchResolver::new(Arc::new(MemoryStore::new()));
        let resolution = resolver.resolve(&domain("example.com")).await.unwrap();

        assert_eq!(resolution.classification, Classification::Undefined);
        assert!(resolution.record.is_none());
        assert_eq!(resolution.failed_lookups, 0);
    }

    #[tokio::test]
    async fn test_equals_beats_contains() {
        let store = MemoryStore::with_records([
            DomainRecord::new("gmail", Classification::Blacklist, MatchKind::Contains),
            DomainRecord::new("gmail.com", Classification::Whitelist, MatchKind::Equals),
        ]);
        let resolver = MatchResolver::new(Arc::new(store));

        let resolution = resolver.resolve(&domain("gmail.com")).await.unwrap();
        assert_eq!(resolution.classification, Classification::Whitelist);
        assert_eq!(resolution.match_kind(), Some(MatchKind::Equals));
    }

    #[tokio::test]
    async fn test_prefix_beats_suffix() {
        let store = MemoryStore::with_records([
            DomainRecord::new(".example.com", Classification::Whitelist, MatchKind::Suffix),
            DomainRecord::new("ads.", Classification::Blacklist, MatchKind::Prefix),
        ]);
        let resolver = MatchResolver::new(Arc::new(store));

        let resolution = resolver.resolve(&domain("ads.example.com")).await.unwrap();
        assert_eq!(resolution.classification, Classification::Blacklist);
        assert_eq!(resolution.match_kind(), Some(MatchKind::Prefix));
    }

    #[tokio::test]
    async fn test_stored_undefined_is_reported_as_is() {
        let store = MemoryStore::with_records([
            DomainRecord::new("pending.example", Classification::Undefined, MatchKind::Equals),
            DomainRecord::new("example", Classification::Blacklist, MatchKind::Contains),
        ]);
        let resolver = MatchResolver::new(Arc::new(store));

        let resolution = resolver.resolve(&domain("pending.example")).await.unwrap();
        assert_eq!(resolution.classification, Classification::Undefined);
        assert_eq!(resolution.match_kind(), Some(MatchKind::Equals));
    }
}
