//! Configuration file parsing.
//!
//! Loads the database location, log format and the classifier and access
//! sections from TOML. Every field has a default, so an empty file is valid.

use crate::error::{CliError, Result};
use inspect_access::AccessConfig;
use inspect_classifier::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable output
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// SQLite database path (`:memory:` for a throwaway database)
    pub database_path: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Domain classification settings
    pub classifier: ClassifierConfig,

    /// Access cache settings
    pub access: AccessConfig,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            database_path: "inspect.db".to_string(),
            log_format: LogFormat::Compact,
            classifier: ClassifierConfig::default(),
            access: AccessConfig::default(),
        }
    }
}

impl InspectConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: InspectConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::Config("database_path must not be empty".to_string()));
        }
        self.classifier
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        self.access
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
database_path = ":memory:"
log_format = "json"

[classifier]
fallback_timeout_ms = 250
fallback_address = "http://127.0.0.1:9090"
trusted_classifications = ["blacklist"]

[access]
ttl_secs = 30
capacity = 100
sweep_interval_secs = 10
"#
        )
        .unwrap();

        let config = InspectConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.classifier.fallback_timeout(), Duration::from_millis(250));
        assert_eq!(
            config.classifier.fallback_address.as_deref(),
            Some("http://127.0.0.1:9090")
        );
        assert_eq!(config.classifier.lookup_request_timeout_ms, 10_000);
        assert_eq!(config.access.capacity, Some(100));
        assert_eq!(config.access.sweep_interval(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = InspectConfig::from_file(file.path()).unwrap();
        assert_eq!(config, InspectConfig::default());
    }

    #[test]
    fn test_invalid_section_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[access]\ncapacity = 0").unwrap();

        let result = InspectConfig::from_file(file.path());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_format = [").unwrap();
        assert!(matches!(
            InspectConfig::from_file(file.path()),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            InspectConfig::load(Some(Path::new("/nonexistent/inspect.toml"))),
            Err(CliError::Io(_))
        ));
        assert!(InspectConfig::load(None).is_ok());
    }
}
