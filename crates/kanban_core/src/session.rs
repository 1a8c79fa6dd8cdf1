//! Board session: the single owner of board state for one UI.
//!
//! # Responsibility
//! - Own the repository, both controllers, the current view and notice.
//! - Dispatch typed UI commands and re-render after every mutation.
//!
//! # Invariants
//! - Commands run to completion, persistence included, before returning.
//! - Validation and not-found errors end as notices and never escape
//!   `dispatch`.
//! - After every re-render the drag controller is bound to the new view.

use crate::controller::drag::{DragController, DragEvent, DragOutcome};
use crate::controller::form::{CloseReason, FormController, FormError, FormInput, SaveOutcome};
use crate::model::column::{ColumnId, BOARD_COLUMNS};
use crate::model::task::TaskId;
use crate::notice::Notice;
use crate::render::board::{render_board, BoardView};
use crate::repo::task_repo::{InitReport, LoadSource, RepoError, TaskRepository};
use crate::store::{KvStore, StorageError};
use log::warn;
use mockable::Clock;

/// Blocking yes/no prompt used before destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt that always answers yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// A key press as reported by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewTask,
    CloseModal,
}

/// Maps key presses to board shortcuts: `Ctrl+N` and `Escape`.
pub fn shortcut_for(press: &KeyPress) -> Option<Shortcut> {
    match (press.ctrl, press.key.as_str()) {
        (true, "n" | "N") => Some(Shortcut::NewTask),
        (_, "Escape") => Some(Shortcut::CloseModal),
        _ => None,
    }
}

/// Every UI event the board reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Global "new task" or a column's "+" button.
    OpenCreate { column: Option<ColumnId> },
    OpenEdit(TaskId),
    SubmitForm(FormInput),
    CloseModal(CloseReason),
    Delete(TaskId),
    Key(KeyPress),
    Drag(DragEvent),
}

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this task?";

/// Board state holder driving controllers, repository and renderer.
pub struct BoardSession<S: KvStore, C: Clock> {
    repo: TaskRepository<S, C>,
    form: FormController,
    drag: DragController,
    view: BoardView,
    notice: Option<Notice>,
    prompt: Box<dyn ConfirmPrompt>,
}

impl<S: KvStore, C: Clock> BoardSession<S, C> {
    pub fn new(repo: TaskRepository<S, C>, prompt: Box<dyn ConfirmPrompt>) -> Self {
        Self {
            repo,
            form: FormController::new(),
            drag: DragController::new(),
            view: BoardView::default(),
            notice: None,
            prompt,
        }
    }

    /// Loads or seeds the board and renders it for the first time.
    pub fn start(&mut self) -> InitReport {
        let report = self.repo.initialize();
        match &report.source {
            LoadSource::Recovered(_) => {
                self.notice = Some(Notice::error(
                    "Saved board could not be loaded. Starting a new workspace.",
                ));
            }
            LoadSource::Stored | LoadSource::FirstRun => {}
        }
        if let Some(err) = &report.storage_error {
            self.notice = Some(storage_warning(err));
        }
        self.rerender();
        report
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn repo(&self) -> &TaskRepository<S, C> {
        &self.repo
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Notice produced by the most recent command, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Handles one UI command and returns the notice it produced.
    pub fn dispatch(&mut self, command: BoardCommand) -> Option<Notice> {
        self.notice = None;
        match command {
            BoardCommand::OpenCreate { column } => self.form.open_create(column),
            BoardCommand::OpenEdit(id) => {
                if let Err(err) = self.form.open_edit(&self.repo, id) {
                    self.notice = Some(repo_error_notice(&err));
                }
            }
            BoardCommand::SubmitForm(input) => self.submit(input),
            BoardCommand::CloseModal(reason) => self.form.close(reason),
            BoardCommand::Delete(id) => self.delete_task(id),
            BoardCommand::Key(press) => match shortcut_for(&press) {
                Some(Shortcut::NewTask) => self.form.open_create(None),
                Some(Shortcut::CloseModal) => self.form.close(CloseReason::Escape),
                None => {}
            },
            BoardCommand::Drag(event) => self.handle_drag(event),
        }
        self.notice.clone()
    }

    fn submit(&mut self, input: FormInput) {
        match self.form.save(input, &mut self.repo) {
            Ok(outcome) => {
                let (persisted, message) = match outcome {
                    SaveOutcome::Created(persisted) => (persisted, "Task created."),
                    SaveOutcome::Updated(persisted) => (persisted, "Task updated."),
                };
                self.notice = Some(persisted.storage_error.as_ref().map_or_else(
                    || Notice::success(message),
                    storage_warning,
                ));
                self.rerender();
            }
            Err(FormError::NotOpen) => {}
            Err(FormError::Repo(err)) => self.notice = Some(repo_error_notice(&err)),
        }
    }

    fn delete_task(&mut self, id: TaskId) {
        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            return;
        }
        match self.repo.delete(id) {
            Ok(persisted) => {
                self.notice = Some(persisted.storage_error.as_ref().map_or_else(
                    || Notice::success("Task deleted."),
                    storage_warning,
                ));
                self.rerender();
            }
            Err(err) => self.notice = Some(repo_error_notice(&err)),
        }
    }

    fn handle_drag(&mut self, event: DragEvent) {
        match self.drag.handle(event, &mut self.repo) {
            DragOutcome::Moved { storage_error, .. } => {
                self.notice = Some(storage_error.as_ref().map_or_else(
                    || Notice::success("Card moved."),
                    storage_warning,
                ));
                self.rerender();
            }
            DragOutcome::Failed { error, .. } => {
                self.notice = Some(repo_error_notice(&error));
            }
            DragOutcome::Ignored
            | DragOutcome::Started(_)
            | DragOutcome::Hover
            | DragOutcome::Unchanged(_)
            | DragOutcome::Cancelled(_) => {}
        }
    }

    fn rerender(&mut self) {
        let generation = self.view.generation + 1;
        self.view = render_board(generation, &BOARD_COLUMNS, self.repo.tasks());
        self.drag.bind(generation);
    }
}

fn repo_error_notice(err: &RepoError) -> Notice {
    match err {
        RepoError::Validation(_) => Notice::error("Task title is required."),
        RepoError::NotFound(_) => Notice::error("Task not found."),
        RepoError::IdsExhausted => Notice::error("No more tasks can be created on this board."),
    }
}

fn storage_warning(err: &StorageError) -> Notice {
    warn!("event=notice module=session kind=storage_warning error={err}");
    Notice::warning("Could not save the board. Check the available storage space.")
}
