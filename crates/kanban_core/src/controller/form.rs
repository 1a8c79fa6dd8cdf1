//! Create/edit modal controller.
//!
//! # Responsibility
//! - Track whether the task modal is closed or open for create/edit.
//! - Turn raw field values into validated [`TaskFields`] and forward them to
//!   the repository.
//!
//! # Invariants
//! - A failed validation keeps the modal open with the user's input.
//! - Closing without saving never touches the repository.

use crate::model::column::{default_column, ColumnId};
use crate::model::task::{Priority, Task, TaskFields, TaskId};
use crate::repo::task_repo::{Persisted, RepoError, RepoResult, TaskRepository};
use crate::store::KvStore;
use log::{debug, info};
use mockable::Clock;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static LEADING_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(FormMode),
}

/// Why the modal was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Cancel,
    Escape,
    ClickOutside,
    Saved,
}

/// Raw form widget values, exactly as typed or selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub column: String,
    pub comments: String,
    pub attachments: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::ALL[0].as_str().to_string(),
            column: default_column().to_string(),
            comments: "0".to_string(),
            attachments: "0".to_string(),
        }
    }
}

impl FormInput {
    /// Prefills the form from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority.as_str().to_string(),
            column: task.column.to_string(),
            comments: task.comments.to_string(),
            attachments: task.attachments.to_string(),
        }
    }

    /// Coerces raw values into task fields.
    ///
    /// Counts go through [`coerce_count`]; an unknown priority falls back to
    /// the first option. The title is not validated here.
    pub fn to_fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: Priority::parse(&self.priority).unwrap_or(Priority::ALL[0]),
            column: ColumnId::new(self.column.trim()),
            comments: coerce_count(&self.comments),
            attachments: coerce_count(&self.attachments),
        }
    }
}

/// Parses the leading integer of `raw`; empty, invalid or negative → `0`.
pub fn coerce_count(raw: &str) -> u32 {
    LEADING_INTEGER_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map_or(0, |value| {
            u32::try_from(value.max(0)).unwrap_or(u32::MAX)
        })
}

/// Form save failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("the task form is not open")]
    NotOpen,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Successful save.
#[derive(Debug)]
pub enum SaveOutcome {
    Created(Persisted<Task>),
    Updated(Persisted<Task>),
}

impl SaveOutcome {
    pub fn task(&self) -> &Task {
        match self {
            Self::Created(persisted) | Self::Updated(persisted) => &persisted.value,
        }
    }
}

/// Modal state plus the field values currently shown.
#[derive(Debug, Default)]
pub struct FormController {
    state: ModalState,
    fields: FormInput,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Field values to show in the modal.
    pub fn fields(&self) -> &FormInput {
        &self.fields
    }

    /// Opens an empty form; `column` preselects the target column.
    pub fn open_create(&mut self, column: Option<ColumnId>) {
        self.fields = FormInput::default();
        if let Some(column) = column {
            self.fields.column = column.to_string();
        }
        self.state = ModalState::Open(FormMode::Create);
        debug!(
            "event=form_open module=form mode=create column={}",
            self.fields.column
        );
    }

    /// Opens the form prefilled from task `id`.
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] when the task is missing; the modal stays
    ///   as it was.
    pub fn open_edit<S: KvStore, C: Clock>(
        &mut self,
        repo: &TaskRepository<S, C>,
        id: TaskId,
    ) -> RepoResult<()> {
        let task = repo.get(id)?;
        self.fields = FormInput::from_task(task);
        self.state = ModalState::Open(FormMode::Edit(id));
        debug!("event=form_open module=form mode=edit task_id={id}");
        Ok(())
    }

    /// Closes without saving.
    pub fn close(&mut self, reason: CloseReason) {
        if self.is_open() {
            debug!("event=form_close module=form reason={reason:?}");
        }
        self.state = ModalState::Closed;
    }

    /// Saves `input` through the repository according to the open mode.
    ///
    /// # Errors
    /// - [`FormError::NotOpen`] when the modal is closed.
    /// - [`RepoError::Validation`] for an empty title; the modal stays open.
    /// - [`RepoError::NotFound`] when the edited task vanished; the modal
    ///   closes.
    pub fn save<S: KvStore, C: Clock>(
        &mut self,
        input: FormInput,
        repo: &mut TaskRepository<S, C>,
    ) -> Result<SaveOutcome, FormError> {
        let ModalState::Open(mode) = self.state else {
            return Err(FormError::NotOpen);
        };
        let fields = input.to_fields();
        self.fields = input;

        let result = match mode {
            FormMode::Create => repo.create(fields).map(SaveOutcome::Created),
            FormMode::Edit(id) => repo.update(id, fields).map(SaveOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                info!(
                    "event=form_save module=form status=ok mode={mode:?} task_id={}",
                    outcome.task().id
                );
                self.close(CloseReason::Saved);
                Ok(outcome)
            }
            Err(err @ RepoError::Validation(_)) => {
                info!("event=form_save module=form status=invalid mode={mode:?}");
                Err(err.into())
            }
            Err(err) => {
                info!("event=form_save module=form status=error mode={mode:?} error={err}");
                self.close(CloseReason::Cancel);
                Err(err.into())
            }
        }
    }
}
