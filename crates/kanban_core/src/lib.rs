//! Core domain logic for the kanban board.
//! This crate is the single source of truth for board invariants.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod notice;
pub mod render;
pub mod repo;
pub mod session;
pub mod store;

pub use controller::drag::{Affordances, DragController, DragEvent, DragOutcome, DragState};
pub use controller::form::{
    coerce_count, CloseReason, FormController, FormError, FormInput, FormMode, ModalState,
    SaveOutcome,
};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::column::{default_column, find_column, Column, ColumnId, BOARD_COLUMNS};
pub use model::task::{Priority, Task, TaskFields, TaskId, TaskValidationError};
pub use notice::{Notice, NoticeKind};
pub use render::board::{render_board, BoardView, CardAction, CardView, ColumnView};
pub use repo::task_repo::{
    InitReport, LoadSource, MoveOutcome, Persisted, RepoError, RepoResult, TaskRepository,
};
pub use session::{
    shortcut_for, AlwaysConfirm, BoardCommand, BoardSession, ConfirmPrompt, KeyPress, Shortcut,
};
pub use store::board_store::{BoardSnapshot, BoardStore, NEXT_ID_KEY, TASKS_KEY};
pub use store::kv::{MemoryKvStore, SqliteKvStore};
pub use store::{KvStore, StorageError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
