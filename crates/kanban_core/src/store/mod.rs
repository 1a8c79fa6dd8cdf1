//! Persistent store adapter.
//!
//! # Responsibility
//! - Abstract the local key-value store the board is mirrored into.
//! - Serialize repository snapshots to and from that store.
//!
//! # Invariants
//! - The adapter never mutates repository state; it only sees snapshots.
//! - Every failure surfaces as [`StorageError`]; nothing is retried.

use crate::db::DbError;
use thiserror::Error;

pub mod board_store;
pub mod kv;

pub type StoreResult<T> = Result<T, StorageError>;

/// Read/write failure of the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] DbError),
    #[error("storage quota exceeded: {required} bytes needed, {quota} available")]
    QuotaExceeded { required: usize, quota: usize },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("corrupt payload under `{key}`: {message}")]
    Corrupt { key: &'static str, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(DbError::Sqlite(value))
    }
}

/// Minimal string key-value store, the device-local equivalent of browser
/// local storage.
pub trait KvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Writes several entries. Backends that support it apply them atomically.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> StoreResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
