//! Output formatting for the CLI.

use crate::error::{CliError, Result};
use inspect_classifier::Verdict;
use inspect_domain::AccessGrant;

/// Output formatter.
pub struct Formatter {
    json: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Format a classification verdict.
    pub fn verdict(&self, verdict: &Verdict) -> Result<String> {
        if self.json {
            let value = serde_json::json!({
                "domain": verdict.domain.as_str(),
                "classification": verdict.classification.as_str(),
                "source": verdict.source.to_string(),
                "degraded": verdict.is_degraded(),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut line = format!(
            "{}\t{}\t({})",
            verdict.domain, verdict.classification, verdict.source
        );
        if verdict.is_degraded() {
            line.push_str("\tremote lookup still pending");
        }
        Ok(line)
    }

    /// Format an authorized grant.
    pub fn grant(&self, grant: &AccessGrant) -> Result<String> {
        if self.json {
            let value = serde_json::json!({
                "token": grant.token_hint(),
                "subscription_type": grant.subscription_type.as_str(),
                "access_count": grant.access_count,
                "access_expiry": grant.access_expiry,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        Ok(format!(
            "Authorized {} ({}, {} accesses, expires at {})",
            grant.token_hint(),
            grant.subscription_type,
            grant.access_count,
            grant.access_expiry
        ))
    }

    /// Format confirmation of a provisioned grant.
    pub fn provisioned(&self, grant: &AccessGrant) -> Result<String> {
        if self.json {
            let value = serde_json::json!({
                "provisioned": true,
                "token": grant.token_hint(),
                "subscription_type": grant.subscription_type.as_str(),
                "access_expiry": grant.access_expiry,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        Ok(format!(
            "Provisioned {} ({}, expires at {})",
            grant.token_hint(),
            grant.subscription_type,
            grant.access_expiry
        ))
    }

    /// Format an error for stderr.
    pub fn error(&self, error: &CliError) -> String {
        if self.json {
            let value = serde_json::json!({
                "error": error.kind().as_str(),
                "message": error.user_message(),
            });
            return value.to_string();
        }
        format!("Error: {}", error.user_message())
    }
}
