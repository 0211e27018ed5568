//! Classification module - the verdict produced for a domain

use std::fmt;

/// Verdict for a domain name
///
/// `Undefined` means no authoritative answer is known, either because no
/// stored record matched or because the remote lookup did not answer in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    /// No verdict is known
    #[default]
    Undefined,

    /// Domain is denied
    Blacklist,

    /// Domain is explicitly allowed
    Whitelist,
}

impl Classification {
    /// All classifications, in declaration order
    pub const ALL: [Classification; 3] = [
        Classification::Undefined,
        Classification::Blacklist,
        Classification::Whitelist,
    ];

    /// Get the classification name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Undefined => "undefined",
            Classification::Blacklist => "blacklist",
            Classification::Whitelist => "whitelist",
        }
    }

    /// Parse a classification from a string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use inspect_domain::Classification;
    ///
    /// assert_eq!(Classification::parse("BLACKLIST"), Some(Classification::Blacklist));
    /// assert_eq!(Classification::parse(" whitelist "), Some(Classification::Whitelist));
    /// assert_eq!(Classification::parse("greylist"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "undefined" => Some(Classification::Undefined),
            "blacklist" => Some(Classification::Blacklist),
            "whitelist" => Some(Classification::Whitelist),
            _ => None,
        }
    }

    /// Whether this is an authoritative verdict (anything but `Undefined`)
    pub fn is_defined(&self) -> bool {
        !matches!(self, Classification::Undefined)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
