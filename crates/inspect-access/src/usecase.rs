//! Token authorization use case

use crate::{AccessCache, AccessError};
use inspect_domain::{token_hint, AccessGrant, AccessStore};
use std::sync::Arc;

/// Authorizes tokens against cached grants and provisions new ones
pub struct AccessUsecase<S> {
    cache: Arc<AccessCache<S>>,
}

impl<S: AccessStore> AccessUsecase<S> {
    /// Create the use case over a shared cache
    pub fn new(cache: Arc<AccessCache<S>>) -> Self {
        Self { cache }
    }

    /// Resolve `token` to an active grant
    ///
    /// The subscription expiry is checked on every call, so a cached copy of
    /// a lapsed grant is still rejected.
    pub async fn authorize(&self, token: &str) -> Result<AccessGrant, AccessError> {
        self.authorize_at(token, inspect_domain::unix_now()).await
    }

    /// Resolve `token` to a grant that is active at `now` (Unix seconds)
    pub async fn authorize_at(&self, token: &str, now: u64) -> Result<AccessGrant, AccessError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AccessError::InvalidToken);
        }
        let hint = token_hint(token);

        let grant = self.cache.get(token).await.map_err(|e| {
            tracing::error!(token = %hint, error = %e, "Access store read failed");
            AccessError::Store(e.to_string())
        })?;

        let Some(grant) = grant else {
            tracing::info!(token = %hint, "Rejected unknown token");
            return Err(AccessError::TokenNotFound { hint });
        };

        if !grant.is_active_at(now) {
            tracing::info!(
                token = %hint,
                subscription = %grant.subscription_type,
                expired_at = grant.access_expiry,
                "Rejected inactive subscription"
            );
            return Err(AccessError::SubscriptionNotActive {
                hint,
                expired_at: grant.access_expiry,
            });
        }

        tracing::debug!(token = %hint, subscription = %grant.subscription_type, "Authorized");
        Ok(grant)
    }

    /// Store a new or updated grant and refresh its cached copy
    ///
    /// The token is trimmed the same way [`authorize`](Self::authorize) trims it.
    pub async fn provision(&self, mut grant: AccessGrant) -> Result<(), AccessError> {
        let token = grant.token.trim().to_string();
        if token.is_empty() {
            return Err(AccessError::InvalidToken);
        }
        grant.token = token;
        let hint = grant.token_hint();
        let subscription = grant.subscription_type;

        self.cache.put(grant).await.map_err(|e| {
            tracing::error!(token = %hint, error = %e, "Failed to provision grant");
            AccessError::Store(e.to_string())
        })?;

        tracing::info!(token = %hint, subscription = %subscription, "Provisioned grant");
        Ok(())
    }

    /// Shared cache behind this use case
    pub fn cache(&self) -> &Arc<AccessCache<S>> {
        &self.cache
    }
}
