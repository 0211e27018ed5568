//! HTTP lookup client
//!
//! Talks JSON to the remote classification service:
//!
//! ```text
//! POST {endpoint}/classify
//! {"domain": "example.com", "client_ip": "203.0.113.7"}
//!
//! 200 OK
//! {"classification": "blacklist"}
//! ```
//!
//! The client only speaks the protocol. Deciding whether a returned
//! classification is usable is left to the caller.

use crate::LookupError;
use inspect_domain::{LookupRequest, LookupResponse, RemoteLookup};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request timeout (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of attempts per classification
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Base delay between attempts; doubles after each failure
const RETRY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on the delay between attempts
const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

/// Remote classification client over HTTP
#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    endpoint: String,
    client: reqwest::Client,
    max_attempts: u32,
}

#[derive(Serialize)]
struct ClassifyBody<'a> {
    domain: &'a str,
    client_ip: String,
}

#[derive(Deserialize)]
struct ClassifyReply {
    classification: String,
}

impl HttpLookupClient {
    /// Create a client with the default request timeout
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use inspect_lookup::HttpLookupClient;
    ///
    /// let client = HttpLookupClient::new("http://127.0.0.1:9090").unwrap();
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LookupError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client whose every request is capped at `timeout`
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Retry transient failures up to `max_attempts` total attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Service endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn attempt(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError> {
        let url = format!("{}/classify", self.endpoint);
        let body = ClassifyBody {
            domain: &request.domain,
            client_ip: request.client_ip.to_string(),
        };

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(LookupError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let reply: ClassifyReply = serde_json::from_slice(&bytes)?;
        Ok(LookupResponse {
            classification: reply.classification,
        })
    }
}

impl RemoteLookup for HttpLookupClient {
    type Error = LookupError;

    async fn classify(&self, request: LookupRequest) -> Result<LookupResponse, Self::Error> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempts < self.max_attempts => {
                    tracing::debug!(
                        domain = %request.domain,
                        attempt = attempts,
                        error = %e,
                        "Remote lookup failed, retrying"
                    );
                    tokio::time::sleep(retry_delay(attempts)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Delay before the attempt following failed attempt number `attempt`
fn retry_delay(attempt: u32) -> Duration {
    2u32
        .checked_pow(attempt.saturating_sub(1))
        .and_then(|factor| RETRY_BASE_DELAY.checked_mul(factor))
        .map_or(RETRY_MAX_DELAY, |delay| delay.min(RETRY_MAX_DELAY))
}
