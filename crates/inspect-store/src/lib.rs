//! Inspect Storage Layer
//!
//! Implements the `MatchStore` and `AccessStore` traits from `inspect-domain`.
//!
//! # Backends
//!
//! - [`SqliteStore`]: durable storage on SQLite. Queries run on the blocking
//!   thread pool so callers never stall the async runtime.
//! - [`MemoryStore`]: process-local maps, for tests and ephemeral setups.
//!
//! Both backends resolve several matches of one kind the same way: the
//! longest pattern wins and ties go to the lexicographically smallest name.
//!
//! # Examples
//!
//! ```no_run
//! use inspect_store::SqliteStore;
//!
//! let store = SqliteStore::open(":memory:").unwrap();
//! // Store is now ready for lookups
//! ```

#![warn(missing_docs)]

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A thread panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,

    /// The blocking task running a query failed
    #[error("Store task failed: {0}")]
    Task(String),
}
