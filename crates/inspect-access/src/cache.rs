//! Cache-aside layer over an `AccessStore`

use crate::metrics::StatsRecorder;
use crate::{AccessConfig, CacheStats, ConfigError};
use inspect_domain::{token_hint, AccessGrant, AccessStore};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

struct CacheEntry {
    grant: AccessGrant,
    inserted_at: Instant,
}

impl CacheEntry {
    fn new(grant: AccessGrant) -> Self {
        Self {
            grant,
            inserted_at: Instant::now(),
        }
    }

    /// A zero TTL expires the entry immediately
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// TTL- and capacity-bounded LRU cache of access grants
///
/// `get` answers from the cache while an entry is fresh and otherwise reads
/// through to the store. `put` writes the store first; the cache is only
/// updated once the store accepted the grant. Expired grants are not filtered
/// here, the cache only bounds how stale a copy can be.
///
/// The LRU sits behind a mutex that is never held across an await.
pub struct AccessCache<S> {
    store: Arc<S>,
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
    stats: StatsRecorder,
}

impl<S: AccessStore> AccessCache<S> {
    /// Create a cache in front of `store`
    pub fn new(store: Arc<S>, config: &AccessConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let entries = match config.capacity {
            Some(capacity) => {
                let capacity = NonZeroUsize::new(capacity)
                    .ok_or_else(|| ConfigError::Invalid("Invalid cache capacity".to_string()))?;
                LruCache::new(capacity)
            }
            None => LruCache::unbounded(),
        };

        Ok(Self {
            store,
            entries: Mutex::new(entries),
            ttl: config.ttl(),
            stats: StatsRecorder::default(),
        })
    }

    /// Get the grant for `token`, reading through to the store on a miss
    ///
    /// Concurrent misses for the same token may each read the store; the last
    /// one to finish leaves its copy in the cache.
    pub async fn get(&self, token: &str) -> Result<Option<AccessGrant>, S::Error> {
        {
            let mut entries = self.lock();
            let cached = entries
                .get(token)
                .map(|entry| (entry.is_expired(self.ttl), entry.grant.clone()));

            match cached {
                Some((false, grant)) => {
                    self.stats.record_hit();
                    return Ok(Some(grant));
                }
                Some((true, _)) => {
                    entries.pop(token);
                    self.stats.record_expirations(1);
                }
                None => {}
            }
        }

        self.stats.record_miss();
        self.stats.record_store_read();
        let grant = self.store.get(token).await?;

        match &grant {
            Some(grant) => self.insert(grant.clone()),
            None => {
                tracing::debug!(token = %token_hint(token), "Token not in access store");
            }
        }

        Ok(grant)
    }

    /// Write `grant` to the store, then cache it
    ///
    /// If the store rejects the write the cache is left untouched.
    pub async fn put(&self, grant: AccessGrant) -> Result<(), S::Error> {
        self.store.create(grant.clone()).await?;
        self.insert(grant);
        Ok(())
    }

    /// Drop the cached copy of `token`, if any
    pub fn invalidate(&self, token: &str) -> bool {
        self.lock().pop(token).is_some()
    }

    /// Remove every expired entry, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(token, _)| token.clone())
            .collect();

        for token in &expired {
            entries.pop(token);
        }

        self.stats.record_expirations(expired.len() as u64);
        expired.len()
    }

    /// Number of cached entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    fn insert(&self, grant: AccessGrant) {
        let token = grant.token.clone();
        let displaced = self.lock().push(token.clone(), CacheEntry::new(grant));

        // push hands back the previous value for the same key, or the LRU victim
        if let Some((evicted, _)) = displaced {
            if evicted != token {
                self.stats.record_eviction();
                tracing::debug!(token = %token_hint(&evicted), "Evicted least recently used grant");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_domain::SubscriptionType;
    use inspect_store::MemoryStore;

    fn grant(token: &str) -> AccessGrant {
        AccessGrant {
            token: token.to_string(),
            subscription_type: SubscriptionType::Trial,
            access_count: 1,
            access_expiry: u64::MAX,
        }
    }

    fn cache(capacity: Option<usize>, ttl_secs: u64) -> AccessCache<MemoryStore> {
        let config = AccessConfig {
            ttl_secs,
            capacity,
            sweep_interval_secs: None,
        };
        AccessCache::new(Arc::new(MemoryStore::new()), &config).unwrap()
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = cache(Some(2), 60);
        cache.put(grant("a")).await.unwrap();
        cache.put(grant("b")).await.unwrap();

        // touch "a" so "b" becomes the victim
        cache.get("a").await.unwrap();
        cache.put(grant("c")).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert!(!cache.invalidate("b"));
        assert!(cache.invalidate("a"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[tokio::test]
    async fn test_reput_same_token_is_not_an_eviction() {
        let cache = cache(Some(1), 60);
        cache.put(grant("a")).await.unwrap();
        cache.put(grant("a")).await.unwrap();
        assert_eq!(cache.stats().evictions, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = cache(None, 10);
        cache.put(grant("old")).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;
        cache.put(grant("new")).await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.invalidate("new"));
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = AccessConfig {
            capacity: Some(0),
            ..Default::default()
        };
        assert!(AccessCache::new(Arc::new(MemoryStore::new()), &config).is_err());
    }
}
