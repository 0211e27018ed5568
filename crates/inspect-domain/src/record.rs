//! Domain records and the strategies by which they match an input

use crate::Classification;
use std::fmt;

/// Strategy by which a stored record pattern matches an input domain
///
/// Variants are declared from most to least specific; that order is the
/// precedence used when several kinds match the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKind {
    /// Input equals the pattern
    Equals,

    /// Input starts with the pattern
    Prefix,

    /// Input ends with the pattern
    Suffix,

    /// Input contains the pattern anywhere
    Contains,
}

impl MatchKind {
    /// All match kinds, most specific first
    pub const BY_PRECEDENCE: [MatchKind; 4] = [
        MatchKind::Equals,
        MatchKind::Prefix,
        MatchKind::Suffix,
        MatchKind::Contains,
    ];

    /// Get the match kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Equals => "equals",
            MatchKind::Prefix => "prefix",
            MatchKind::Suffix => "suffix",
            MatchKind::Contains => "contains",
        }
    }

    /// Parse a match kind from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "equals" => Some(MatchKind::Equals),
            "prefix" => Some(MatchKind::Prefix),
            "suffix" => Some(MatchKind::Suffix),
            "contains" => Some(MatchKind::Contains),
            _ => None,
        }
    }

    /// Precedence rank; lower wins
    pub fn precedence(&self) -> usize {
        *self as usize
    }

    /// Check whether `pattern` of this kind matches `domain`
    ///
    /// # Examples
    ///
    /// ```
    /// use inspect_domain::MatchKind;
    ///
    /// assert!(MatchKind::Suffix.matches(".doubleclick.net", "ad.doubleclick.net"));
    /// assert!(MatchKind::Prefix.matches("ads.", "ads.example.com"));
    /// assert!(!MatchKind::Equals.matches("example.com", "www.example.com"));
    /// ```
    pub fn matches(&self, pattern: &str, domain: &str) -> bool {
        if pattern.is_empty() {
            return false;
        }
        match self {
            MatchKind::Equals => domain == pattern,
            MatchKind::Prefix => domain.starts_with(pattern),
            MatchKind::Suffix => domain.ends_with(pattern),
            MatchKind::Contains => domain.contains(pattern),
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored domain pattern with its classification
///
/// Records are unique on `(name, match_kind)`. The resolver only reads them;
/// they are written by classification persistence (remote lookups) or by
/// administrative tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// Pattern, lower-cased
    pub name: String,

    /// Verdict attached to the pattern
    pub classification: Classification,

    /// How the pattern is compared to inputs
    pub match_kind: MatchKind,

    /// Creation timestamp (Unix seconds)
    pub created_at: u64,

    /// Last update timestamp (Unix seconds)
    pub updated_at: u64,
}

impl DomainRecord {
    /// Create a record stamped with the current time
    pub fn new(
        name: impl Into<String>,
        classification: Classification,
        match_kind: MatchKind,
    ) -> Self {
        let now = crate::unix_now();
        Self {
            name: name.into().to_lowercase(),
            classification,
            match_kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this record matches the given domain
    pub fn matches(&self, domain: &str) -> bool {
        self.match_kind.matches(&self.name, domain)
    }
}
