//! Deterministic remote lookup for tests

use crate::LookupError;
use inspect_domain::{LookupRequest, LookupResponse, RemoteLookup};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Mock remote lookup returning pre-configured classifications
///
/// No network calls are made. An optional delay is slept on the tokio clock,
/// so tests using paused time can drive it deterministically. Clones share
/// the call counter and the per-domain answers.
///
/// # Examples
///
/// ```
/// use inspect_lookup::MockLookup;
/// use std::time::Duration;
///
/// let lookup = MockLookup::new("undefined")
///     .with_response("casino.example", "blacklist")
///     .with_delay(Duration::from_millis(50));
/// assert_eq!(lookup.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockLookup {
    default_response: String,
    responses: Arc<RwLock<HashMap<String, String>>>,
    failing: Arc<RwLock<Vec<String>>>,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
}

impl MockLookup {
    /// Answer every domain with `classification`
    pub fn new(classification: impl Into<String>) -> Self {
        Self {
            default_response: classification.into(),
            responses: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(Vec::new())),
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer `domain` with a specific classification
    pub fn with_response(self, domain: impl Into<String>, classification: impl Into<String>) -> Self {
        if let Ok(mut responses) = self.responses.write() {
            responses.insert(domain.into(), classification.into());
        }
        self
    }

    /// Fail lookups for `domain` with a connection error
    pub fn with_failure(self, domain: impl Into<String>) -> Self {
        if let Ok(mut failing) = self.failing.write() {
            failing.push(domain.into());
        }
        self
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `classify` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockLookup {
    fn default() -> Self {
        Self::new("undefined")
    }
}

impl RemoteLookup for MockLookup {
    type Error = LookupError;

    async fn classify(&self, request: LookupRequest) -> Result<LookupResponse, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let fails = self
            .failing
            .read()
            .map(|f| f.iter().any(|d| d == &request.domain))
            .unwrap_or(false);
        if fails {
            return Err(LookupError::Connection("mock failure".to_string()));
        }

        let classification = self
            .responses
            .read()
            .ok()
            .and_then(|r| r.get(&request.domain).cloned())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(LookupResponse { classification })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(domain: &str) -> LookupRequest {
        LookupRequest {
            domain: domain.to_string(),
            client_ip: "10.0.0.1".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_specific_and_default_responses() {
        let lookup = MockLookup::new("whitelist").with_response("bad.example", "blacklist");

        let response = lookup.classify(request("bad.example")).await.unwrap();
        assert_eq!(response.classification, "blacklist");

        let response = lookup.classify(request("other.example")).await.unwrap();
        assert_eq!(response.classification, "whitelist");
    }

    #[tokio::test]
    async fn test_failure_and_call_count() {
        let lookup = MockLookup::default().with_failure("down.example");

        let result = lookup.classify(request("down.example")).await;
        assert!(matches!(result, Err(LookupError::Connection(_))));

        lookup.classify(request("up.example")).await.unwrap();
        assert_eq!(lookup.call_count(), 2);

        lookup.reset_call_count();
        assert_eq!(lookup.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_uses_tokio_clock() {
        let lookup = MockLookup::new("blacklist").with_delay(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        lookup.classify(request("slow.example")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_clones_share_counter() {
        let a = MockLookup::new("blacklist");
        let b = a.clone();
        a.classify(request("x.example")).await.unwrap();
        assert_eq!(b.call_count(), 1);
    }
}
