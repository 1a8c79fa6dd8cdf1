//! Fixed board columns.
//!
//! Columns are defined outside the core and never created or destroyed at
//! runtime. The core only reads their identifiers to route tasks.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a board column as stored on a task.
///
/// Not validated against [`BOARD_COLUMNS`]: a task may reference an unknown
/// column, in which case the renderer reports it as unplaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ColumnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Static description of one board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub id: &'static str,
    pub title: &'static str,
}

impl Column {
    pub fn column_id(&self) -> ColumnId {
        ColumnId::new(self.id)
    }

    pub fn matches(&self, id: &ColumnId) -> bool {
        self.id == id.as_str()
    }
}

/// The five workflow stages shown on the board, in display order.
pub const BOARD_COLUMNS: [Column; 5] = [
    Column {
        id: "1",
        title: "Today",
    },
    Column {
        id: "2",
        title: "In Progress",
    },
    Column {
        id: "3",
        title: "In Review",
    },
    Column {
        id: "4",
        title: "Done",
    },
    Column {
        id: "5",
        title: "Notes",
    },
];

/// First column of the board; the default for new tasks.
pub fn default_column() -> ColumnId {
    BOARD_COLUMNS[0].column_id()
}

/// Looks up a fixed column by identifier.
pub fn find_column(id: &ColumnId) -> Option<&'static Column> {
    BOARD_COLUMNS.iter().find(|column| column.matches(id))
}

#[cfg(test)]
mod tests {
    use super::{default_column, find_column, ColumnId, BOARD_COLUMNS};

    #[test]
    fn column_ids_are_unique() {
        for (index, column) in BOARD_COLUMNS.iter().enumerate() {
            assert!(BOARD_COLUMNS[index + 1..]
                .iter()
                .all(|other| other.id != column.id));
        }
    }

    #[test]
    fn default_column_is_first() {
        assert_eq!(default_column(), ColumnId::new("1"));
    }

    #[test]
    fn unknown_column_is_not_found() {
        assert!(find_column(&ColumnId::new("9")).is_none());
        assert_eq!(find_column(&ColumnId::new("4")).map(|c| c.title), Some("Done"));
    }
}
