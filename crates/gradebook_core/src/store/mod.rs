//! Key-value store boundary for persisted collections.
//!
//! # Responsibility
//! - Define the synchronous key -> string contract every host must satisfy.
//! - Provide an in-memory implementation and a durable SQLite implementation.
//!
//! # Invariants
//! - `get` on a missing key returns `Ok(None)`, never an error.
//! - Keys are independent: there is no transactionality across `set` calls,
//!   so a crash between two writes can leave collections inconsistent. This
//!   is an accepted limitation of the storage contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{open_store, open_store_in_memory, SqliteStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for open and read/write operations.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous key-value storage contract.
///
/// One key holds one JSON-serialized collection (or one scalar preference).
/// Implementations never interpret the stored text.
pub trait Store {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}
