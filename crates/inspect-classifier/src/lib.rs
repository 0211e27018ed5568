//! Inspect Classification Service
//!
//! Turns an email address or bare domain into a [`Classification`].
//!
//! # Flow
//!
//! 1. The raw input is parsed into a [`DomainName`]
//! 2. [`MatchResolver`] runs the equals, prefix, suffix and contains lookups
//!    concurrently and picks the most specific hit once all four have finished
//! 3. If nothing defined matched, [`LookupFallbackClient`] asks the remote
//!    service within a time budget; late answers are persisted in the
//!    background so the next request resolves locally
//!
//! [`ClassificationUsecase`] wires the steps together and reports a
//! [`Verdict`] that says where the answer came from.
//!
//! [`Classification`]: inspect_domain::Classification
//! [`DomainName`]: inspect_domain::DomainName

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod fallback;
pub mod resolver;
pub mod usecase;

pub use config::ClassifierConfig;
pub use error::{ClassifyError, ConfigError, ResolveError};
pub use fallback::{FallbackOutcome, LookupFallbackClient};
pub use resolver::{MatchResolver, Resolution};
pub use usecase::{ClassificationUsecase, Verdict, VerdictSource};
