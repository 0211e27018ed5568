//! In-memory store

use crate::StoreError;
use inspect_domain::{
    AccessGrant, AccessStore, Classification, Created, DomainRecord, MatchKind, MatchStore,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Process-local implementation of `MatchStore` and `AccessStore`
///
/// Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<DomainRecord>>>,
    grants: Arc<RwLock<HashMap<String, AccessGrant>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with domain records
    ///
    /// Later records with an existing `(name, match_kind)` are dropped.
    pub fn with_records(records: impl IntoIterator<Item = DomainRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut stored) = store.records.write() {
            for record in records {
                if !stored
                    .iter()
                    .any(|r| r.name == record.name && r.match_kind == record.match_kind)
                {
                    stored.push(record);
                }
            }
        }
        store
    }

    /// Number of stored domain records
    pub fn record_count(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    fn find(&self, kind: MatchKind, name: &str) -> Result<Option<DomainRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let best = records
            .iter()
            .filter(|r| r.match_kind == kind && r.matches(name))
            .min_by(|a, b| {
                b.name
                    .len()
                    .cmp(&a.name.len())
                    .then_with(|| a.name.cmp(&b.name))
            })
            .cloned();
        Ok(best)
    }
}

impl MatchStore for MemoryStore {
    type Error = StoreError;

    async fn match_equals(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Equals, name)
    }

    async fn match_prefix(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Prefix, name)
    }

    async fn match_suffix(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Suffix, name)
    }

    async fn match_contains(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Contains, name)
    }

    async fn create(&self, record: DomainRecord) -> Result<Created, Self::Error> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let existing = records
            .iter_mut()
            .find(|r| r.name == record.name && r.match_kind == record.match_kind);

        match existing {
            Some(stored)
                if stored.classification == Classification::Undefined
                    && record.classification.is_defined() =>
            {
                stored.classification = record.classification;
                stored.updated_at = record.updated_at;
                Ok(Created::Replaced)
            }
            Some(_) => Ok(Created::AlreadyExists),
            None => {
                records.push(record);
                Ok(Created::Inserted)
            }
        }
    }
}

impl AccessStore for MemoryStore {
    type Error = StoreError;

    async fn get(&self, token: &str) -> Result<Option<AccessGrant>, Self::Error> {
        let grants = self.grants.read().map_err(|_| StoreError::Poisoned)?;
        Ok(grants.get(token).cloned())
    }

    async fn create(&self, grant: AccessGrant) -> Result<(), Self::Error> {
        let mut grants = self.grants.write().map_err(|_| StoreError::Poisoned)?;
        grants.insert(grant.token.clone(), grant);
        Ok(())
    }
}
