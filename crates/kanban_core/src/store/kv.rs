//! Key-value store backends.

use crate::store::{KvStore, StorageError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

/// SQLite-backed store over the `kv_entries` table.
///
/// The connection must come from [`crate::db::open_db`] so the table exists.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        upsert(self.conn, key, value)?;
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            upsert(&tx, key, value)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO kv_entries (key, value, updated_at)
         VALUES (?1, ?2, strftime('%s', 'now') * 1000)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![key, value],
    )
}

/// In-process store with an optional byte quota.
///
/// Counts successful writes so callers can observe persistence calls.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    writes: usize,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes once keys plus values would exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let required = self.used_bytes() - replaced + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded { required, quota });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
