//! Service wiring.

use crate::config::InspectConfig;
use crate::error::{CliError, Result};
use inspect_access::{AccessCache, AccessUsecase, CacheSweeper};
use inspect_classifier::ClassificationUsecase;
use inspect_lookup::HttpLookupClient;
use inspect_store::SqliteStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Classification and access services built from configuration.
pub struct App {
    /// Domain classification
    pub classifier: ClassificationUsecase<SqliteStore, HttpLookupClient>,
    /// Token authorization
    pub access: AccessUsecase<SqliteStore>,
    sweeper: Option<(CancellationToken, JoinHandle<()>)>,
}

impl App {
    /// Open the store and build both use cases
    ///
    /// Must run inside a tokio runtime when a sweep interval is configured.
    pub fn build(config: &InspectConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(SqliteStore::open(&config.database_path)?);
        tracing::debug!(path = %config.database_path, "Opened store");

        let lookup = match &config.classifier.fallback_address {
            Some(address) => {
                let client = HttpLookupClient::with_timeout(
                    address.as_str(),
                    config.classifier.lookup_request_timeout(),
                )?;
                tracing::debug!(endpoint = %client.endpoint(), "Remote fallback enabled");
                Some(Arc::new(client))
            }
            None => None,
        };

        let classifier =
            ClassificationUsecase::new(Arc::clone(&store), lookup, &config.classifier)
                .map_err(|e| CliError::Config(e.to_string()))?;

        let cache = Arc::new(
            AccessCache::new(store, &config.access).map_err(|e| CliError::Config(e.to_string()))?,
        );

        let sweeper = config.access.sweep_interval().map(|interval| {
            let sweeper = CacheSweeper::new(interval);
            let shutdown = sweeper.shutdown_token();
            (shutdown, sweeper.spawn(Arc::clone(&cache)))
        });

        Ok(Self {
            classifier,
            access: AccessUsecase::new(cache),
            sweeper,
        })
    }

    /// Finish background work before the process exits
    pub async fn shutdown(self) {
        let pending = self.classifier.pending();
        if pending > 0 {
            tracing::debug!(pending, "Waiting for background lookups");
        }
        self.classifier.drain().await;

        if let Some((shutdown, handle)) = self.sweeper {
            shutdown.cancel();
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Cache sweeper task failed");
            }
        }
    }
}
