//! SQLite-backed store

use crate::StoreError;
use inspect_domain::{
    AccessGrant, AccessStore, Classification, Created, DomainRecord, MatchKind, MatchStore,
    SubscriptionType,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

const RECORD_COLUMNS: &str = "name, classification, match_kind, created_at, updated_at";

/// SQLite-based implementation of `MatchStore` and `AccessStore`
///
/// A single connection is shared behind a mutex; every query runs inside
/// `spawn_blocking`. Cloning the store clones the handle, not the database.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use inspect_store::SqliteStore;
    ///
    /// let store = SqliteStore::open("inspect.db").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        conn.execute_batch(schema)?;
        Ok(())
    }

    /// Run a closure against the connection on the blocking pool
    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }

    /// SQL predicate selecting records of `kind` that match `?1`
    fn predicate(kind: MatchKind) -> &'static str {
        match kind {
            MatchKind::Equals => "name = ?1",
            MatchKind::Prefix => "substr(?1, 1, length(name)) = name",
            MatchKind::Suffix => "length(name) <= length(?1) AND substr(?1, -length(name)) = name",
            MatchKind::Contains => "instr(?1, name) > 0",
        }
    }

    async fn find(&self, kind: MatchKind, name: &str) -> Result<Option<DomainRecord>, StoreError> {
        let name = name.to_string();
        let sql = format!(
            "SELECT {} FROM domains
             WHERE match_kind = ?2 AND length(name) > 0 AND {}
             ORDER BY length(name) DESC, name ASC
             LIMIT 1",
            RECORD_COLUMNS,
            Self::predicate(kind)
        );

        self.run(move |conn| {
            let record = conn
                .query_row(&sql, params![name, kind.as_str()], Self::row_to_record)
                .optional()?;
            Ok(record)
        })
        .await
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DomainRecord> {
        let classification: String = row.get(1)?;
        let classification = Classification::parse(&classification).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown classification: {}",
                    classification
                ))),
            )
        })?;

        let match_kind: String = row.get(2)?;
        let match_kind = MatchKind::parse(&match_kind).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown match kind: {}",
                    match_kind
                ))),
            )
        })?;

        Ok(DomainRecord {
            name: row.get(0)?,
            classification,
            match_kind,
            created_at: row.get::<_, i64>(3)? as u64,
            updated_at: row.get::<_, i64>(4)? as u64,
        })
    }

    fn row_to_grant(row: &Row<'_>) -> rusqlite::Result<AccessGrant> {
        let subscription: String = row.get(1)?;
        Ok(AccessGrant {
            token: row.get(0)?,
            subscription_type: SubscriptionType::parse(&subscription),
            access_count: row.get::<_, i64>(2)? as u64,
            access_expiry: row.get::<_, i64>(3)? as u64,
        })
    }
}

impl MatchStore for SqliteStore {
    type Error = StoreError;

    async fn match_equals(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Equals, name).await
    }

    async fn match_prefix(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Prefix, name).await
    }

    async fn match_suffix(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Suffix, name).await
    }

    async fn match_contains(&self, name: &str) -> Result<Option<DomainRecord>, Self::Error> {
        self.find(MatchKind::Contains, name).await
    }

    async fn create(&self, record: DomainRecord) -> Result<Created, Self::Error> {
        self.run(move |conn| {
            let existing: Option<String> = conn
                .query_row(
                    "SELECT classification FROM domains WHERE name = ?1 AND match_kind = ?2",
                    params![record.name, record.match_kind.as_str()],
                    |row| row.get(0),
                )
                .optional()?;

            let changed = conn.execute(
                "INSERT INTO domains (name, classification, match_kind, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(name, match_kind) DO UPDATE
                 SET classification = excluded.classification, updated_at = excluded.updated_at
                 WHERE domains.classification = ?6 AND excluded.classification <> ?6",
                params![
                    record.name,
                    record.classification.as_str(),
                    record.match_kind.as_str(),
                    record.created_at as i64,
                    record.updated_at as i64,
                    Classification::Undefined.as_str(),
                ],
            )?;

            match (existing, changed) {
                (None, _) => Ok(Created::Inserted),
                (Some(_), 0) => {
                    tracing::debug!(
                        name = %record.name,
                        match_kind = %record.match_kind,
                        "Domain record already present"
                    );
                    Ok(Created::AlreadyExists)
                }
                (Some(_), _) => Ok(Created::Replaced),
            }
        })
        .await
    }
}

impl AccessStore for SqliteStore {
    type Error = StoreError;

    async fn get(&self, token: &str) -> Result<Option<AccessGrant>, Self::Error> {
        let token = token.to_string();
        self.run(move |conn| {
            let grant = conn
                .query_row(
                    "SELECT token, subscription_type, access_count, access_expiry
                     FROM access_grants WHERE token = ?1",
                    params![token],
                    Self::row_to_grant,
                )
                .optional()?;
            Ok(grant)
        })
        .await
    }

    async fn create(&self, grant: AccessGrant) -> Result<(), Self::Error> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO access_grants (token, subscription_type, access_count, access_expiry, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(token) DO UPDATE SET
                 subscription_type = excluded.subscription_type,
                 access_count = excluded.access_count,
                 access_expiry = excluded.access_expiry,
                 updated_at = excluded.updated_at",
                params![
                    grant.token,
                    grant.subscription_type.as_str(),
                    grant.access_count as i64,
                    grant.access_expiry as i64,
                    inspect_domain::unix_now() as i64,
                ],
            )?;
            Ok(())
        })
        .await
    }
}
