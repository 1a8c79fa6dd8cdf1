//! Board snapshot serialization over a [`KvStore`].
//!
//! # Invariants
//! - Tasks live under [`TASKS_KEY`] as a JSON array, the counter under
//!   [`NEXT_ID_KEY`] as a JSON integer.
//! - A loaded snapshot has unique task ids and a `next_id` greater than every
//!   task id.

use crate::model::task::{Task, TaskId};
use crate::store::{KvStore, StorageError, StoreResult};
use log::{debug, warn};
use std::collections::HashSet;

pub const TASKS_KEY: &str = "kanban-tasks";
pub const NEXT_ID_KEY: &str = "kanban-next-id";

/// Repository state as seen by the store: a copy, never a live reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub next_id: TaskId,
}

/// Store adapter translating board state to and from key-value entries.
pub struct BoardStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> BoardStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Serializes the task list and id counter under their fixed keys.
    ///
    /// # Errors
    /// - [`StorageError::Encode`] when a value cannot be serialized.
    /// - Any backend error, including [`StorageError::QuotaExceeded`].
    pub fn save(&mut self, tasks: &[Task], next_id: TaskId) -> StoreResult<()> {
        let tasks_json = serde_json::to_string(tasks).map_err(|source| StorageError::Encode {
            key: TASKS_KEY,
            source,
        })?;
        let next_id_json = next_id.to_string();

        self.kv.set_many(&[
            (TASKS_KEY, tasks_json.as_str()),
            (NEXT_ID_KEY, next_id_json.as_str()),
        ])?;
        debug!(
            "event=board_save module=store status=ok task_count={} next_id={next_id} bytes={}",
            tasks.len(),
            tasks_json.len()
        );
        Ok(())
    }

    /// Reads the last saved snapshot.
    ///
    /// Returns `Ok(None)` when no task list was ever saved.
    ///
    /// # Errors
    /// - [`StorageError::Corrupt`] when the task list is not a valid payload,
    ///   repeats an id or uses the largest representable id.
    /// - Any backend read error.
    pub fn load(&self) -> StoreResult<Option<BoardSnapshot>> {
        let Some(tasks_json) = self.kv.get(TASKS_KEY)? else {
            return Ok(None);
        };
        let tasks: Vec<Task> =
            serde_json::from_str(&tasks_json).map_err(|err| StorageError::Corrupt {
                key: TASKS_KEY,
                message: err.to_string(),
            })?;

        let mut seen = HashSet::with_capacity(tasks.len());
        if let Some(task) = tasks.iter().find(|task| !seen.insert(task.id)) {
            return Err(StorageError::Corrupt {
                key: TASKS_KEY,
                message: format!("duplicate task id {}", task.id),
            });
        }
        let max_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        let floor = max_id.checked_add(1).ok_or_else(|| StorageError::Corrupt {
            key: TASKS_KEY,
            message: format!("task id {max_id} leaves no room for new ids"),
        })?;
        let stored = self
            .kv
            .get(NEXT_ID_KEY)?
            .and_then(|raw| raw.trim().parse::<TaskId>().ok());
        let next_id = match stored {
            Some(value) if value >= floor => value,
            other => {
                warn!(
                    "event=board_load module=store status=repair key={NEXT_ID_KEY} stored={other:?} next_id={floor}"
                );
                floor
            }
        };

        Ok(Some(BoardSnapshot { tasks, next_id }))
    }
}
