//! Full-board view model.
//!
//! # Invariants
//! - Every known column appears exactly once, in board order.
//! - Cards keep repository collection order within their column.
//! - Tasks pointing at unknown columns are listed in `unplaced`, never dropped
//!   silently.

use crate::model::column::{Column, ColumnId};
use crate::model::task::{Priority, Task, TaskId};
use log::{debug, warn};

/// Per-card user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit(TaskId),
    Delete(TaskId),
}

/// One rendered task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub task_id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub comments: u32,
    pub attachments: u32,
    pub draggable: bool,
    pub actions: [CardAction; 2],
}

impl CardView {
    fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            description: task.has_description().then(|| task.description.clone()),
            priority: task.priority,
            priority_label: task.priority.label(),
            comments: task.comments,
            attachments: task.attachments,
            draggable: true,
            actions: [CardAction::Edit(task.id), CardAction::Delete(task.id)],
        }
    }
}

/// One rendered column with its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: &'static str,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    /// Number of tasks placed in this column.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Column title with its task counter, e.g. `Today (2)`.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.count())
    }
}

/// Whole-board projection produced by [`render_board`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    /// Increments on every rebuild; interaction handlers bind to it.
    pub generation: u64,
    pub columns: Vec<ColumnView>,
    pub unplaced: Vec<TaskId>,
}

impl BoardView {
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|column| &column.id == id)
    }

    /// Displayed counter for a column; `0` for unknown columns.
    pub fn count_in(&self, id: &ColumnId) -> usize {
        self.column(id).map_or(0, ColumnView::count)
    }

    /// Finds a card and the column holding it.
    pub fn card(&self, task_id: TaskId) -> Option<(&ColumnView, &CardView)> {
        self.columns.iter().find_map(|column| {
            column
                .cards
                .iter()
                .find(|card| card.task_id == task_id)
                .map(|card| (column, card))
        })
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(ColumnView::count).sum()
    }
}

/// Rebuilds the full board from the task list.
pub fn render_board(generation: u64, columns: &[Column], tasks: &[Task]) -> BoardView {
    let mut views: Vec<ColumnView> = columns
        .iter()
        .map(|column| ColumnView {
            id: column.column_id(),
            title: column.title,
            cards: Vec::new(),
        })
        .collect();
    let mut unplaced = Vec::new();

    for task in tasks {
        match views.iter_mut().find(|view| view.id == task.column) {
            Some(view) => view.cards.push(CardView::from_task(task)),
            None => {
                warn!(
                    "event=board_render module=render status=skip task_id={} column={}",
                    task.id, task.column
                );
                unplaced.push(task.id);
            }
        }
    }

    debug!(
        "event=board_render module=render status=ok generation={generation} task_count={}",
        tasks.len()
    );
    BoardView {
        generation,
        columns: views,
        unplaced,
    }
}
