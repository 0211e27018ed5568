//! Inspect Access Gate
//!
//! Token authorization backed by a cache-aside layer over an `AccessStore`.
//!
//! # Overview
//!
//! - [`AccessCache`]: LRU cache of grants, bounded by a per-entry TTL and an
//!   optional capacity. Reads fall through to the store on a miss; writes go
//!   to the store first and only then to the cache.
//! - [`AccessUsecase`]: checks the grant's subscription expiry on every
//!   authorization, including cache hits.
//! - [`CacheSweeper`]: optional background task that purges expired entries.
//! - [`CacheStats`]: hit, miss, expiration, eviction and store-read counters.
//!
//! # Usage
//!
//! ```
//! use inspect_access::{AccessCache, AccessConfig, AccessUsecase};
//! use inspect_domain::{AccessGrant, SubscriptionType};
//! use inspect_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let store = Arc::new(MemoryStore::new());
//!     let cache = Arc::new(AccessCache::new(store, &AccessConfig::default()).unwrap());
//!     let access = AccessUsecase::new(cache);
//!
//!     access
//!         .provision(AccessGrant {
//!             token: "tok_live".to_string(),
//!             subscription_type: SubscriptionType::Business,
//!             access_count: 100,
//!             access_expiry: inspect_domain::unix_now() + 3600,
//!         })
//!         .await
//!         .unwrap();
//!
//!     let grant = access.authorize("tok_live").await.unwrap();
//!     assert_eq!(grant.subscription_type, SubscriptionType::Business);
//! });
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod metrics;
mod sweeper;
mod usecase;

pub use cache::AccessCache;
pub use config::AccessConfig;
pub use error::{AccessError, ConfigError};
pub use metrics::CacheStats;
pub use sweeper::CacheSweeper;
pub use usecase::AccessUsecase;
