//! Domain name parsing and validation
//!
//! Raw input is either a bare domain or an email address. Both forms reduce
//! to the same lower-cased [`DomainName`], so `user@Gmail.com` and
//! `gmail.com` classify identically.

use std::fmt;
use thiserror::Error;

/// Maximum length of a full domain name
pub const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label
pub const MAX_LABEL_LEN: usize = 63;

/// Reasons raw input cannot be turned into a [`DomainName`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Input was empty after trimming
    #[error("input is empty")]
    Empty,

    /// Email address with an empty local part or domain
    #[error("malformed email address: {0}")]
    MalformedEmail(String),

    /// Domain syntax is invalid
    #[error("malformed domain '{domain}': {reason}")]
    MalformedDomain {
        /// Offending domain
        domain: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// Domain has no registrable top-level label
    #[error("no registrable root for domain '{0}'")]
    DomainRootNotFound(String),
}

/// A validated, lower-cased domain name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName(String);

impl DomainName {
    /// Parse raw input that may be an email address or a bare domain
    ///
    /// # Examples
    ///
    /// ```
    /// use inspect_domain::DomainName;
    ///
    /// let from_email = DomainName::from_input("user@Gmail.com").unwrap();
    /// let bare = DomainName::from_input("gmail.com").unwrap();
    /// assert_eq!(from_email, bare);
    /// assert_eq!(bare.as_str(), "gmail.com");
    /// ```
    pub fn from_input(raw: &str) -> Result<Self, InputError> {
        let input = raw.trim().to_lowercase();
        if input.is_empty() {
            return Err(InputError::Empty);
        }

        let domain = match input.rsplit_once('@') {
            Some((local, domain)) => {
                if local.is_empty() || domain.is_empty() {
                    return Err(InputError::MalformedEmail(input.clone()));
                }
                domain.to_string()
            }
            None => input,
        };

        Self::parse(&domain)
    }

    /// Parse a bare domain name
    pub fn parse(domain: &str) -> Result<Self, InputError> {
        let lowered = domain.trim().to_lowercase();
        let domain = lowered.strip_suffix('.').unwrap_or(&lowered);

        if domain.is_empty() {
            return Err(InputError::Empty);
        }
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(malformed(domain, "longer than 253 characters"));
        }

        for label in domain.split('.') {
            validate_label(domain, label)?;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        let tld = labels[labels.len() - 1];
        if labels.len() < 2 || !is_registrable_tld(tld) {
            return Err(InputError::DomainRootNotFound(domain.to_string()));
        }

        Ok(Self(domain.to_string()))
    }

    /// Get the domain as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Registrable root: the last two labels (`mail.google.com` -> `google.com`)
    pub fn root(&self) -> &str {
        match self.0.rmatch_indices('.').nth(1) {
            Some((idx, _)) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Top-level label
    pub fn tld(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn malformed(domain: &str, reason: &'static str) -> InputError {
    InputError::MalformedDomain {
        domain: domain.to_string(),
        reason,
    }
}

fn validate_label(domain: &str, label: &str) -> Result<(), InputError> {
    if label.is_empty() {
        return Err(malformed(domain, "empty label"));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(malformed(domain, "label longer than 63 characters"));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(malformed(domain, "label starts or ends with a hyphen"));
    }
    if !label
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(malformed(domain, "label contains invalid characters"));
    }
    Ok(())
}

fn is_registrable_tld(tld: &str) -> bool {
    if let Some(punycode) = tld.strip_prefix("xn--") {
        return !punycode.is_empty();
    }
    tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_lowercase())
}
