//! In-memory task repository mirrored to a persistent store.
//!
//! # Responsibility
//! - Own the ordered task collection and the next-id counter for a session.
//! - Persist a snapshot synchronously after every mutation.
//!
//! # Invariants
//! - Ids are assigned from the counter and never reused.
//! - A failed save never rolls back the in-memory mutation; the failure is
//!   handed back to the caller in [`Persisted::storage_error`].
//! - A move to the task's current column neither touches the task nor
//!   writes to the store.

use crate::model::column::ColumnId;
use crate::model::task::{Task, TaskFields, TaskId, TaskValidationError};
use crate::repo::seed::{example_tasks, EXAMPLE_NEXT_ID};
use crate::store::board_store::BoardStore;
use crate::store::{KvStore, StorageError};
use log::{error, info, warn};
use mockable::Clock;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised by repository operations before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("no task ids left to assign")]
    IdsExhausted,
}

/// Result of a mutation plus the outcome of mirroring it to the store.
#[derive(Debug)]
#[must_use]
pub struct Persisted<T> {
    pub value: T,
    pub storage_error: Option<StorageError>,
}

impl<T> Persisted<T> {
    pub fn is_durable(&self) -> bool {
        self.storage_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Where the session's initial state came from.
#[derive(Debug)]
pub enum LoadSource {
    /// A previously saved board was restored.
    Stored,
    /// Nothing was saved yet; example tasks were seeded.
    FirstRun,
    /// Saved data could not be read; example tasks were seeded instead.
    Recovered(StorageError),
}

/// Summary of [`TaskRepository::initialize`].
#[derive(Debug)]
pub struct InitReport {
    pub source: LoadSource,
    pub task_count: usize,
    /// Set when seeding succeeded in memory but could not be saved.
    pub storage_error: Option<StorageError>,
}

/// Outcome of a column move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Unchanged,
    Moved { from: ColumnId, to: ColumnId },
}

/// Authoritative task collection for one board session.
pub struct TaskRepository<S: KvStore, C: Clock> {
    tasks: Vec<Task>,
    next_id: TaskId,
    store: BoardStore<S>,
    clock: C,
}

impl<S: KvStore, C: Clock> TaskRepository<S, C> {
    /// Creates an empty repository; call [`Self::initialize`] to load state.
    pub fn new(store: BoardStore<S>, clock: C) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            store,
            clock,
        }
    }

    /// Loads the saved board, or seeds and saves the example board when
    /// nothing is saved or the saved payload cannot be read.
    pub fn initialize(&mut self) -> InitReport {
        let source = match self.store.load() {
            Ok(Some(snapshot)) => {
                self.tasks = snapshot.tasks;
                self.next_id = snapshot.next_id;
                info!(
                    "event=board_init module=repo status=ok source=stored task_count={} next_id={}",
                    self.tasks.len(),
                    self.next_id
                );
                return InitReport {
                    source: LoadSource::Stored,
                    task_count: self.tasks.len(),
                    storage_error: None,
                };
            }
            Ok(None) => LoadSource::FirstRun,
            Err(err) => {
                error!("event=board_init module=repo status=error action=seed error={err}");
                LoadSource::Recovered(err)
            }
        };

        self.tasks = example_tasks(self.clock.utc());
        self.next_id = EXAMPLE_NEXT_ID;
        let storage_error = self.persist("seed");
        info!(
            "event=board_init module=repo status=ok source=seed task_count={}",
            self.tasks.len()
        );
        InitReport {
            source,
            task_count: self.tasks.len(),
            storage_error,
        }
    }

    /// Validates and appends a new task with the next id.
    ///
    /// # Errors
    /// - [`RepoError::Validation`] when the title is empty; nothing changes.
    /// - [`RepoError::IdsExhausted`] when the counter cannot advance; nothing
    ///   changes.
    pub fn create(&mut self, fields: TaskFields) -> RepoResult<Persisted<Task>> {
        let fields = fields.normalized()?;
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(RepoError::IdsExhausted)?;

        let task = Task::new(id, fields, self.clock.utc());
        self.tasks.push(task.clone());
        let storage_error = self.persist("task_create");
        info!(
            "event=task_create module=repo status=ok task_id={id} column={}",
            task.column
        );
        Ok(Persisted {
            value: task,
            storage_error,
        })
    }

    /// Replaces every editable field of an existing task.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] when no task has `id`.
    /// - [`RepoError::Validation`] when the title is empty.
    pub fn update(&mut self, id: TaskId, fields: TaskFields) -> RepoResult<Persisted<Task>> {
        let index = self.index_of(id)?;
        let fields = fields.normalized()?;
        let now = self.clock.utc();

        let task = &mut self.tasks[index];
        task.apply(fields, now);
        let task = task.clone();
        let storage_error = self.persist("task_update");
        info!("event=task_update module=repo status=ok task_id={id}");
        Ok(Persisted {
            value: task,
            storage_error,
        })
    }

    /// Removes a task and returns it.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] when no task has `id`; nothing changes.
    pub fn delete(&mut self, id: TaskId) -> RepoResult<Persisted<Task>> {
        let index = self.index_of(id)?;
        let task = self.tasks.remove(index);
        let storage_error = self.persist("task_delete");
        info!("event=task_delete module=repo status=ok task_id={id}");
        Ok(Persisted {
            value: task,
            storage_error,
        })
    }

    /// Moves a task to another column.
    ///
    /// Moving to the current column is a no-op with no store write.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] when no task has `id`.
    pub fn move_task(&mut self, id: TaskId, column: ColumnId) -> RepoResult<Persisted<MoveOutcome>> {
        let index = self.index_of(id)?;
        if self.tasks[index].column == column {
            info!("event=task_move module=repo status=skip task_id={id} column={column}");
            return Ok(Persisted {
                value: MoveOutcome::Unchanged,
                storage_error: None,
            });
        }

        let now = self.clock.utc();
        let task = &mut self.tasks[index];
        let from = task.column.clone();
        task.move_to(column.clone(), now);
        let storage_error = self.persist("task_move");
        info!("event=task_move module=repo status=ok task_id={id} from={from} to={column}");
        Ok(Persisted {
            value: MoveOutcome::Moved { from, to: column },
            storage_error,
        })
    }

    /// Looks up one task.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] when no task has `id`.
    pub fn get(&self, id: TaskId) -> RepoResult<&Task> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    /// All tasks in collection order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Id the next created task will receive.
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    pub fn count_in(&self, column: &ColumnId) -> usize {
        self.tasks.iter().filter(|task| &task.column == column).count()
    }

    pub fn store(&self) -> &BoardStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BoardStore<S> {
        &mut self.store
    }

    fn index_of(&self, id: TaskId) -> RepoResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    fn persist(&mut self, operation: &str) -> Option<StorageError> {
        match self.store.save(&self.tasks, self.next_id) {
            Ok(()) => None,
            Err(err) => {
                warn!("event=board_save module=repo status=error operation={operation} error={err}");
                Some(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadSource, TaskRepository};
    use crate::model::task::TaskFields;
    use crate::store::board_store::BoardStore;
    use crate::store::kv::MemoryKvStore;
    use mockable::DefaultClock;

    #[test]
    fn index_lookups_follow_removals() {
        let mut repo = TaskRepository::new(BoardStore::new(MemoryKvStore::new()), DefaultClock);
        let report = repo.initialize();
        assert!(matches!(report.source, LoadSource::FirstRun));

        let created = repo.create(TaskFields::titled("tail")).unwrap().into_value();
        repo.delete(1).unwrap();
        assert_eq!(repo.get(created.id).unwrap().title, "tail");
        assert!(repo.get(1).is_err());
    }
}
