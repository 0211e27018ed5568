//! Background purge of expired cache entries

use crate::AccessCache;
use inspect_domain::AccessStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Periodically drops expired grants from an `AccessCache`
///
/// Reads already ignore expired entries; sweeping only keeps memory bounded
/// for tokens that are never asked for again.
///
/// # Examples
///
/// ```
/// use inspect_access::{AccessCache, AccessConfig, CacheSweeper};
/// use inspect_store::MemoryStore;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let cache = Arc::new(
///         AccessCache::new(Arc::new(MemoryStore::new()), &AccessConfig::default()).unwrap(),
///     );
///     let sweeper = CacheSweeper::new(Duration::from_secs(30));
///     let shutdown = sweeper.shutdown_token();
///     let handle = sweeper.spawn(cache);
///
///     shutdown.cancel();
///     handle.await.unwrap();
/// });
/// ```
pub struct CacheSweeper {
    interval: Duration,
    shutdown: CancellationToken,
}

impl CacheSweeper {
    /// Create a sweeper running every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops the sweeper when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Run the sweeper on its own task
    pub fn spawn<S>(self, cache: Arc<AccessCache<S>>) -> JoinHandle<()>
    where
        S: AccessStore + 'static,
    {
        tokio::spawn(self.run(cache))
    }

    /// Sweep until the shutdown token is cancelled
    pub async fn run<S>(self, cache: Arc<AccessCache<S>>)
    where
        S: AccessStore,
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;

        tracing::info!(interval_secs = self.interval.as_secs(), "Cache sweeper started");

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    break;
                }
                _ = ticker.tick() => {
                    let purged = cache.purge_expired();
                    if purged > 0 {
                        tracing::debug!(purged, remaining = cache.len(), "Purged expired grants");
                    }
                }
            }
        }

        tracing::info!("Cache sweeper stopped. Final stats:\n{}", cache.stats().summary());
    }
}
