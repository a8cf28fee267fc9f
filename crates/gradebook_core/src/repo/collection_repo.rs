//! Collection load/seed/save cycle over the store boundary.
//!
//! # Responsibility
//! - Map one storage key to one typed collection.
//! - Recover from absent or corrupted blobs by seeding and re-persisting.
//!
//! # Invariants
//! - Deserialization is typed at the boundary: a blob that does not match
//!   the expected shape is treated as corrupt, not trusted field-by-field.
//! - Recovery persists the substitute data immediately, so the next load
//!   sees consistent state.

use crate::store::{Store, StoreError};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the students collection.
pub const STUDENTS_KEY: &str = "gradebook.students";
/// Storage key for the assignments collection.
pub const ASSIGNMENTS_KEY: &str = "gradebook.assignments";
/// Storage key for the grades collection.
pub const GRADES_KEY: &str = "gradebook.grades";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for collection load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the persisted blob.
    Persisted,
    /// Key was absent; seed data was substituted and persisted.
    Seeded,
    /// Blob existed but failed to parse; seed data replaced it.
    RecoveredFromCorrupt,
}

/// Per-collection load outcome for the whole gradebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub students: LoadSource,
    pub assignments: LoadSource,
    pub grades: LoadSource,
}

impl LoadReport {
    /// True when any persisted blob had to be discarded as corrupt.
    /// Drives the non-blocking "failed to load" message in hosts.
    pub fn had_corruption(&self) -> bool {
        [self.students, self.assignments, self.grades]
            .iter()
            .any(|source| *source == LoadSource::RecoveredFromCorrupt)
    }
}

/// Loads one collection, seeding on absence or corruption.
///
/// # Contract
/// - Absent key: `seed()` data is persisted and returned as `Seeded`.
/// - Malformed blob: the parse error is logged, `seed()` data is persisted
///   and returned as `RecoveredFromCorrupt`. The error never escapes.
/// - Store transport failures are propagated unchanged.
pub fn load_collection<T, S>(
    store: &mut S,
    key: &str,
    seed: impl FnOnce() -> Vec<T>,
) -> RepoResult<(Vec<T>, LoadSource)>
where
    T: Serialize + DeserializeOwned,
    S: Store,
{
    match store.get(key)? {
        Some(raw) => match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => Ok((items, LoadSource::Persisted)),
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=recovered key={key} error_code=corrupt_blob error={err}"
                );
                let items = seed();
                save_collection(store, key, &items)?;
                Ok((items, LoadSource::RecoveredFromCorrupt))
            }
        },
        None => {
            let items = seed();
            save_collection(store, key, &items)?;
            Ok((items, LoadSource::Seeded))
        }
    }
}

/// Re-serializes the whole collection under its key (write-through).
pub fn save_collection<T, S>(store: &mut S, key: &str, items: &[T]) -> RepoResult<()>
where
    T: Serialize,
    S: Store,
{
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)?;
    Ok(())
}
