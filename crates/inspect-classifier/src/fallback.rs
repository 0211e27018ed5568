//! Remote classification fallback
//!
//! Each remote call runs on a tracked background task. The caller waits at
//! most the configured budget for the answer; when the budget runs out it
//! gets [`FallbackOutcome::Degraded`] and the task keeps going. Whenever the
//! remote answer arrives, a trusted defined classification is written back to
//! the store as an equals record, so the next request resolves locally.
//!
//! Remote failures never reach the caller.

use crate::{ClassifierConfig, ConfigError};
use inspect_domain::{
    Classification, Created, DomainName, DomainRecord, LookupRequest, MatchKind, MatchStore,
    RemoteLookup,
};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::task::TaskTracker;

/// Result of a fallback attempt as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackOutcome {
    /// The remote service answered in time with a trusted classification
    Classified(Classification),

    /// The remote service answered in time without a usable classification,
    /// or failed
    Unclassified,

    /// The budget expired; the call continues in the background
    Degraded,
}

impl FallbackOutcome {
    /// Classification to hand back to the caller
    pub fn classification(&self) -> Classification {
        match self {
            FallbackOutcome::Classified(c) => *c,
            FallbackOutcome::Unclassified | FallbackOutcome::Degraded => Classification::Undefined,
        }
    }

    /// Whether the answer was cut short by the budget
    pub fn is_degraded(&self) -> bool {
        matches!(self, FallbackOutcome::Degraded)
    }
}

/// Bounded-time remote lookup with write-behind persistence
pub struct LookupFallbackClient<S, L> {
    store: Arc<S>,
    lookup: Arc<L>,
    budget: Duration,
    request_timeout: Duration,
    trusted: Arc<[Classification]>,
    tasks: TaskTracker,
}

impl<S, L> LookupFallbackClient<S, L>
where
    S: MatchStore + 'static,
    L: RemoteLookup + 'static,
{
    /// Create a fallback client, rejecting an invalid configuration
    pub fn new(
        store: Arc<S>,
        lookup: Arc<L>,
        config: &ClassifierConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store,
            lookup,
            budget: config.fallback_timeout(),
            request_timeout: config.lookup_request_timeout(),
            trusted: config.trusted().into(),
            tasks: TaskTracker::new(),
        })
    }

    /// Ask the remote service to classify `domain`
    ///
    /// Waits at most the configured budget. The remote call and the store
    /// write run on a detached task that outlives this future, whether it
    /// completes, times out or is dropped. Use [`drain`](Self::drain) to wait
    /// for that work.
    pub async fn classify_with_fallback(
        &self,
        domain: &DomainName,
        client_ip: IpAddr,
    ) -> FallbackOutcome {
        let (tx, rx) = oneshot::channel();
        let request = LookupRequest {
            domain: domain.as_str().to_string(),
            client_ip,
        };

        let store = Arc::clone(&self.store);
        let lookup = Arc::clone(&self.lookup);
        let trusted = Arc::clone(&self.trusted);
        let request_timeout = self.request_timeout;

        self.tasks.spawn(async move {
            let domain = request.domain.clone();
            let started = Instant::now();

            let answer =
                match tokio::time::timeout(request_timeout, lookup.classify(request)).await {
                    Ok(Ok(response)) => accept(&domain, &response.classification, &trusted),
                    Ok(Err(e)) => {
                        tracing::warn!(domain = %domain, error = %e, "Remote lookup failed");
                        None
                    }
                    Err(_) => {
                        tracing::warn!(
                            domain = %domain,
                            timeout_ms = request_timeout.as_millis() as u64,
                            "Remote lookup exceeded request timeout"
                        );
                        None
                    }
                };

            tracing::debug!(
                domain = %domain,
                duration_ms = started.elapsed().as_millis() as u64,
                "Remote lookup finished"
            );

            // The caller may have stopped waiting; that is not an error
            let _ = tx.send(answer);

            if let Some(classification) = answer {
                persist(store.as_ref(), &domain, classification).await;
            }
        });

        match tokio::time::timeout(self.budget, rx).await {
            Ok(Ok(Some(classification))) => FallbackOutcome::Classified(classification),
            Ok(Ok(None)) => FallbackOutcome::Unclassified,
            Ok(Err(_)) => {
                tracing::error!(domain = %domain, "Remote lookup task ended without an answer");
                FallbackOutcome::Unclassified
            }
            Err(_) => {
                tracing::info!(
                    domain = %domain,
                    budget_ms = self.budget.as_millis() as u64,
                    "Remote lookup over budget, continuing in background"
                );
                FallbackOutcome::Degraded
            }
        }
    }

    /// Wait for every background lookup started so far
    pub async fn drain(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    /// Number of background lookups still running
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

/// Keep a remote answer only if it names a trusted, defined classification
fn accept(domain: &str, raw: &str, trusted: &[Classification]) -> Option<Classification> {
    match Classification::parse(raw) {
        Some(Classification::Undefined) => {
            tracing::debug!(domain = %domain, "Remote service has no classification");
            None
        }
        Some(c) if trusted.contains(&c) => Some(c),
        Some(c) => {
            tracing::warn!(domain = %domain, classification = %c, "Ignoring untrusted remote classification");
            None
        }
        None => {
            tracing::warn!(domain = %domain, classification = %raw, "Unrecognized remote classification");
            None
        }
    }
}

async fn persist<S: MatchStore>(store: &S, domain: &str, classification: Classification) {
    let record = DomainRecord::new(domain, classification, MatchKind::Equals);
    match store.create(record).await {
        Ok(Created::Inserted) => {
            tracing::info!(
                domain = %domain,
                classification = %classification,
                "Persisted remote classification"
            );
        }
        Ok(Created::Replaced) => {
            tracing::info!(
                domain = %domain,
                classification = %classification,
                "Replaced undefined record with remote classification"
            );
        }
        Ok(Created::AlreadyExists) => {
            tracing::debug!(domain = %domain, "Domain already classified, keeping stored record");
        }
        Err(e) => {
            tracing::warn!(domain = %domain, error = %e, "Failed to persist remote classification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_filters_untrusted() {
        let trusted = [Classification::Blacklist];
        assert_eq!(
            accept("a.com", "BLACKLIST", &trusted),
            Some(Classification::Blacklist)
        );
        assert_eq!(accept("a.com", "whitelist", &trusted), None);
        assert_eq!(accept("a.com", "undefined", &trusted), None);
        assert_eq!(accept("a.com", "greylist", &trusted), None);
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(
            FallbackOutcome::Classified(Classification::Whitelist).classification(),
            Classification::Whitelist
        );
        assert_eq!(
            FallbackOutcome::Degraded.classification(),
            Classification::Undefined
        );
        assert!(FallbackOutcome::Degraded.is_degraded());
        assert!(!FallbackOutcome::Unclassified.is_degraded());
    }
}
