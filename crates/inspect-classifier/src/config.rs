//! Configuration for domain classification
//!
//! Defines the remote fallback budget, the remote endpoint and the set of
//! classifications trusted from the remote service.

use crate::ConfigError;
use inspect_domain::Classification;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the classification service
///
/// # Examples
///
/// ```
/// use inspect_classifier::ClassifierConfig;
/// use std::time::Duration;
///
/// let config = ClassifierConfig::default();
/// assert_eq!(config.fallback_timeout(), Duration::from_secs(1));
/// assert!(config.fallback_address.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// How long a caller waits for the remote service (in milliseconds)
    /// Default: 1000
    pub fallback_timeout_ms: u64,

    /// Remote classification endpoint; `None` disables the fallback
    pub fallback_address: Option<String>,

    /// Hard cap for a single remote call, including calls that keep running
    /// after the caller stopped waiting (in milliseconds)
    /// Default: 10000
    pub lookup_request_timeout_ms: u64,

    /// Remote classifications that may be returned and persisted
    /// Default: blacklist, whitelist
    pub trusted_classifications: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fallback_timeout_ms: 1000,
            fallback_address: None,
            lookup_request_timeout_ms: 10_000,
            trusted_classifications: vec!["blacklist".to_string(), "whitelist".to_string()],
        }
    }
}

impl ClassifierConfig {
    /// Get the caller-side fallback budget as Duration
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    /// Get the per-call hard cap as Duration
    pub fn lookup_request_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_request_timeout_ms)
    }

    /// Parse the trusted classification names
    ///
    /// Unknown names and `undefined` are skipped; `validate` rejects them.
    pub fn trusted(&self) -> Vec<Classification> {
        self.trusted_classifications
            .iter()
            .filter_map(|name| Classification::parse(name))
            .filter(Classification::is_defined)
            .collect()
    }

    /// Check the configuration for inconsistent values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "fallback_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.lookup_request_timeout_ms < self.fallback_timeout_ms {
            return Err(ConfigError::Invalid(format!(
                "lookup_request_timeout_ms ({}) must not be shorter than fallback_timeout_ms ({})",
                self.lookup_request_timeout_ms, self.fallback_timeout_ms
            )));
        }

        if let Some(address) = &self.fallback_address {
            if !(address.starts_with("http://") || address.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "fallback_address must be an http(s) URL: {}",
                    address
                )));
            }
        }

        for name in &self.trusted_classifications {
            match Classification::parse(name) {
                Some(c) if c.is_defined() => {}
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "Unknown trusted classification: {}",
                        name
                    )))
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert_eq!(config.fallback_timeout_ms, 1000);
        assert_eq!(config.lookup_request_timeout_ms, 10_000);
        assert_eq!(
            config.trusted(),
            vec![Classification::Blacklist, Classification::Whitelist]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = ClassifierConfig {
            fallback_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_request_cap_shorter_than_budget_rejected() {
        let config = ClassifierConfig {
            fallback_timeout_ms: 2000,
            lookup_request_timeout_ms: 500,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_untrusted_names_rejected() {
        let config = ClassifierConfig {
            trusted_classifications: vec!["greylist".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClassifierConfig {
            trusted_classifications: vec!["undefined".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_address_scheme_checked() {
        let config = ClassifierConfig {
            fallback_address: Some("127.0.0.1:9090".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClassifierConfig =
            serde_json::from_str(r#"{"fallback_timeout_ms": 250}"#).unwrap();
        assert_eq!(config.fallback_timeout(), Duration::from_millis(250));
        assert_eq!(config.lookup_request_timeout_ms, 10_000);
    }
}
