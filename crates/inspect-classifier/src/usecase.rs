//! Classification use case

use crate::{
    ClassifierConfig, ClassifyError, ConfigError, FallbackOutcome, LookupFallbackClient,
    MatchResolver,
};
use inspect_domain::{Classification, DomainName, MatchKind, MatchStore, RemoteLookup};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::time::Instant;

/// Where a verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    /// A stored record of this match kind
    Store(MatchKind),

    /// The remote service, within budget
    Remote,

    /// The remote budget expired before an answer arrived
    Degraded,

    /// Nothing usable was found locally or remotely
    Unresolved,
}

impl fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictSource::Store(kind) => write!(f, "store:{}", kind),
            VerdictSource::Remote => f.write_str("remote"),
            VerdictSource::Degraded => f.write_str("degraded"),
            VerdictSource::Unresolved => f.write_str("unresolved"),
        }
    }
}

/// Classification of one input together with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Domain extracted from the input
    pub domain: DomainName,

    /// Final classification
    pub classification: Classification,

    /// Where the classification came from
    pub source: VerdictSource,
}

impl Verdict {
    /// Whether the answer was returned before the remote service replied
    pub fn is_degraded(&self) -> bool {
        self.source == VerdictSource::Degraded
    }
}

/// Classifies emails and domains against the store, then the remote service
///
/// # Examples
///
/// ```
/// use inspect_classifier::{ClassificationUsecase, ClassifierConfig};
/// use inspect_domain::{Classification, DomainRecord, MatchKind};
/// use inspect_lookup::MockLookup;
/// use inspect_store::MemoryStore;
/// use std::sync::Arc;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let store = Arc::new(MemoryStore::with_records([DomainRecord::new(
///         "gmail.com",
///         Classification::Whitelist,
///         MatchKind::Equals,
///     )]));
///     let usecase = ClassificationUsecase::<_, MockLookup>::new(
///         store,
///         None,
///         &ClassifierConfig::default(),
///     )
///     .unwrap();
///
///     let verdict = usecase
///         .classify("someone@Gmail.com", "127.0.0.1".parse().unwrap())
///         .await
///         .unwrap();
///     assert_eq!(verdict.classification, Classification::Whitelist);
/// });
/// ```
pub struct ClassificationUsecase<S, L> {
    resolver: MatchResolver<S>,
    fallback: Option<LookupFallbackClient<S, L>>,
}

impl<S, L> ClassificationUsecase<S, L>
where
    S: MatchStore + 'static,
    L: RemoteLookup + 'static,
{
    /// Create the use case; without a `lookup` the remote fallback is skipped
    ///
    /// The configuration is validated even when no fallback is wired.
    pub fn new(
        store: Arc<S>,
        lookup: Option<Arc<L>>,
        config: &ClassifierConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let fallback = lookup
            .map(|lookup| LookupFallbackClient::new(Arc::clone(&store), lookup, config))
            .transpose()?;
        Ok(Self {
            resolver: MatchResolver::new(store),
            fallback,
        })
    }

    /// Classify an email address or bare domain
    ///
    /// Remote failures degrade to `Undefined`; only invalid input and a
    /// completely unreadable store produce errors.
    pub async fn classify(&self, raw: &str, client_ip: IpAddr) -> Result<Verdict, ClassifyError> {
        let started = Instant::now();

        let domain = DomainName::from_input(raw).map_err(|e| {
            tracing::debug!(input = %raw, error = %e, "Rejected classification input");
            e
        })?;

        let resolution = self.resolver.resolve(&domain).await.map_err(|e| {
            tracing::error!(
                input = %raw,
                domain = %domain,
                error = %e,
                "Local resolution failed"
            );
            e
        })?;

        let (classification, source) = match resolution.match_kind() {
            Some(kind) if resolution.classification.is_defined() => {
                (resolution.classification, VerdictSource::Store(kind))
            }
            _ => match &self.fallback {
                Some(fallback) => match fallback.classify_with_fallback(&domain, client_ip).await {
                    FallbackOutcome::Classified(c) => (c, VerdictSource::Remote),
                    FallbackOutcome::Degraded => {
                        (Classification::Undefined, VerdictSource::Degraded)
                    }
                    FallbackOutcome::Unclassified => {
                        (Classification::Undefined, VerdictSource::Unresolved)
                    }
                },
                None => (Classification::Undefined, VerdictSource::Unresolved),
            },
        };

        tracing::info!(
            input = %raw,
            domain = %domain,
            root = %domain.root(),
            classification = %classification,
            source = %source,
            duration_ms = started.elapsed().as_millis() as u64,
            "Classified"
        );

        Ok(Verdict {
            domain,
            classification,
            source,
        })
    }

    /// Wait for outstanding background lookups and their store writes
    pub async fn drain(&self) {
        if let Some(fallback) = &self.fallback {
            fallback.drain().await;
        }
    }

    /// Number of background lookups still running
    pub fn pending(&self) -> usize {
        self.fallback.as_ref().map(|f| f.pending()).unwrap_or(0)
    }
}
