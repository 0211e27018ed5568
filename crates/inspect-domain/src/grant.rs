//! Access grants - subscription tokens that gate API access

use std::fmt;

/// Subscription plan attached to an access grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubscriptionType {
    /// Plan could not be determined
    #[default]
    Unknown,
    /// Time-limited evaluation
    Trial,
    /// Startup plan
    Startup,
    /// Business plan
    Business,
}

impl SubscriptionType {
    /// Get the subscription name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Unknown => "unknown",
            SubscriptionType::Trial => "trial",
            SubscriptionType::Startup => "startup",
            SubscriptionType::Business => "business",
        }
    }

    /// Parse a subscription type; unrecognised values map to `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "trial" => SubscriptionType::Trial,
            "startup" => SubscriptionType::Startup,
            "business" => SubscriptionType::Business,
            _ => SubscriptionType::Unknown,
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provisioned access token and its subscription state
///
/// Tokens are unique. Grants are created and updated by an external
/// provisioning event and never deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// Opaque API token
    pub token: String,

    /// Subscription plan
    pub subscription_type: SubscriptionType,

    /// Number of accesses granted by the plan
    pub access_count: u64,

    /// Subscription expiry (Unix seconds)
    pub access_expiry: u64,
}

impl AccessGrant {
    /// Whether the subscription is still running at `now` (Unix seconds)
    ///
    /// The expiry instant itself is already outside the subscription.
    pub fn is_active_at(&self, now: u64) -> bool {
        self.access_expiry > now
    }

    /// Short, log-safe prefix of the token
    pub fn token_hint(&self) -> String {
        token_hint(&self.token)
    }
}

/// Short, log-safe prefix of an API token
///
/// Full tokens are credentials and must never reach the logs.
pub fn token_hint(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{}…", prefix)
}
