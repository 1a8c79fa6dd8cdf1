//! Drag-and-drop interaction state machine.
//!
//! One drag session at a time: `Idle -> Dragging -> (dropped | cancelled) ->
//! Idle`. Only a drop over a column reaches the repository.
//!
//! # Invariants
//! - Affordances are cleared whenever the session ends, whatever the outcome.
//! - Hover enter/leave never changes the state, only the drop-target marker.
//! - A drag can only start from a card of the currently bound render whose
//!   task still exists.

use crate::model::column::ColumnId;
use crate::model::task::TaskId;
use crate::repo::task_repo::{MoveOutcome, Persisted, RepoError, TaskRepository};
use crate::store::{KvStore, StorageError};
use log::{debug, info};
use mockable::Clock;

/// Pointer gesture events delivered by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// Pointer down and move on a card rendered in `generation`.
    Start { task_id: TaskId, generation: u64 },
    /// Pointer entered a column surface.
    Enter(ColumnId),
    /// Pointer left a column surface.
    Leave(ColumnId),
    /// Released over a column surface.
    Drop(ColumnId),
    /// Gesture ended without a drop (released outside every column).
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task_id: TaskId,
        hover: Option<ColumnId>,
    },
}

/// Visual markers the UI should currently show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affordances {
    /// Card shown as lifted.
    pub lifted: Option<TaskId>,
    /// Column highlighted as drop target.
    pub drop_target: Option<ColumnId>,
}

/// What a single event did.
#[derive(Debug)]
pub enum DragOutcome {
    /// Event had no meaning in the current state.
    Ignored,
    Started(TaskId),
    Hover,
    /// Dropped onto another column; the board must be re-rendered.
    Moved {
        task_id: TaskId,
        from: ColumnId,
        to: ColumnId,
        storage_error: Option<StorageError>,
    },
    /// Dropped onto the column the task already occupies.
    Unchanged(TaskId),
    Cancelled(TaskId),
    /// Dropped, but the repository rejected the move.
    Failed { task_id: TaskId, error: RepoError },
}

/// Drag controller bound to one rendered board generation.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    bound_generation: u64,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn bound_generation(&self) -> u64 {
        self.bound_generation
    }

    /// Re-attaches handlers to a freshly rendered board.
    pub fn bind(&mut self, generation: u64) {
        self.bound_generation = generation;
    }

    pub fn affordances(&self) -> Affordances {
        match &self.state {
            DragState::Idle => Affordances::default(),
            DragState::Dragging { task_id, hover } => Affordances {
                lifted: Some(*task_id),
                drop_target: hover.clone(),
            },
        }
    }

    /// Feeds one gesture event through the state machine.
    pub fn handle<S: KvStore, C: Clock>(
        &mut self,
        event: DragEvent,
        repo: &mut TaskRepository<S, C>,
    ) -> DragOutcome {
        // Arms that end the session leave the state `Idle`.
        let state = std::mem::take(&mut self.state);
        match (state, event) {
            (
                DragState::Idle,
                DragEvent::Start {
                    task_id,
                    generation,
                },
            ) => {
                if generation != self.bound_generation {
                    debug!(
                        "event=drag_start module=drag status=skip task_id={task_id} generation={generation} bound={}",
                        self.bound_generation
                    );
                    return DragOutcome::Ignored;
                }
                if repo.get(task_id).is_err() {
                    debug!("event=drag_start module=drag status=skip task_id={task_id} reason=unknown_task");
                    return DragOutcome::Ignored;
                }
                self.state = DragState::Dragging {
                    task_id,
                    hover: None,
                };
                debug!("event=drag_start module=drag status=ok task_id={task_id}");
                DragOutcome::Started(task_id)
            }
            (DragState::Dragging { task_id, .. }, DragEvent::Enter(column)) => {
                self.state = DragState::Dragging {
                    task_id,
                    hover: Some(column),
                };
                DragOutcome::Hover
            }
            (DragState::Dragging { task_id, hover }, DragEvent::Leave(column)) => {
                self.state = DragState::Dragging {
                    task_id,
                    hover: hover.filter(|current| current != &column),
                };
                DragOutcome::Hover
            }
            (DragState::Dragging { task_id, .. }, DragEvent::Drop(column)) => {
                Self::drop_onto(task_id, column, repo)
            }
            (DragState::Dragging { task_id, .. }, DragEvent::End) => {
                debug!("event=drag_end module=drag status=cancelled task_id={task_id}");
                DragOutcome::Cancelled(task_id)
            }
            (state, _) => {
                self.state = state;
                DragOutcome::Ignored
            }
        }
    }

    fn drop_onto<S: KvStore, C: Clock>(
        task_id: TaskId,
        column: ColumnId,
        repo: &mut TaskRepository<S, C>,
    ) -> DragOutcome {
        match repo.move_task(task_id, column) {
            Ok(Persisted {
                value: MoveOutcome::Moved { from, to },
                storage_error,
            }) => {
                info!("event=drag_drop module=drag status=ok task_id={task_id} from={from} to={to}");
                DragOutcome::Moved {
                    task_id,
                    from,
                    to,
                    storage_error,
                }
            }
            Ok(Persisted {
                value: MoveOutcome::Unchanged,
                ..
            }) => DragOutcome::Unchanged(task_id),
            Err(error) => {
                info!("event=drag_drop module=drag status=error task_id={task_id} error={error}");
                DragOutcome::Failed { task_id, error }
            }
        }
    }
}
