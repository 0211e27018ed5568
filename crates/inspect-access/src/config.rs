//! Configuration for the access cache

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for `AccessCache` and its sweeper
///
/// # Examples
///
/// ```
/// use inspect_access::AccessConfig;
/// use std::time::Duration;
///
/// let config = AccessConfig::default();
/// assert_eq!(config.ttl(), Duration::from_secs(60));
/// assert!(config.capacity.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Lifetime of a cached grant (in seconds)
    /// Default: 60
    pub ttl_secs: u64,

    /// Maximum number of cached grants; `None` bounds the cache by TTL only
    pub capacity: Option<usize>,

    /// How often expired entries are purged (in seconds); `None` relies on
    /// lazy expiry during reads
    pub sweep_interval_secs: Option<u64>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            capacity: None,
            sweep_interval_secs: None,
        }
    }
}

impl AccessConfig {
    /// Get the entry TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Get the sweep interval as Duration
    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_secs.map(Duration::from_secs)
    }

    /// Check the configuration for out-of-range values
    ///
    /// A TTL of zero is allowed: every entry expires as soon as it is written.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "capacity must be greater than zero when set".to_string(),
            ));
        }
        if self.sweep_interval_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "sweep_interval_secs must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccessConfig::default();
        assert_eq!(config.ttl_secs, 60);
        assert_eq!(config.capacity, None);
        assert_eq!(config.sweep_interval(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values() {
        let config = AccessConfig {
            ttl_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = AccessConfig {
            capacity: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AccessConfig {
            sweep_interval_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AccessConfig = serde_json::from_str(r#"{"capacity": 500}"#).unwrap();
        assert_eq!(config.capacity, Some(500));
        assert_eq!(config.ttl_secs, 60);
    }
}
