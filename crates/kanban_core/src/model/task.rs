//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its persisted wire shape.
//! - Provide lifecycle helpers used by the repository (edit, move).
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `title` is non-empty (after trimming) whenever a task is saved.
//! - Every mutation helper refreshes `updated_at`.

use crate::model::column::{default_column, ColumnId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Monotonically assigned task identifier.
pub type TaskId = u64;

/// Task urgency shown as a badge on the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities in form option order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Human-readable badge text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low priority",
            Self::Medium => "Medium priority",
            Self::High => "High priority",
        }
    }

    /// Parses a form/CLI value; case-insensitive, surrounding space ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Validation failures for task content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task title is required")]
    EmptyTitle,
}

/// Editable task content, as collected by the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub column: ColumnId,
    pub comments: u32,
    pub attachments: u32,
}

impl TaskFields {
    /// Creates fields with the given title and form defaults for the rest.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            column: default_column(),
            comments: 0,
            attachments: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = column.into();
        self
    }

    pub fn with_counts(mut self, comments: u32, attachments: u32) -> Self {
        self.comments = comments;
        self.attachments = attachments;
        self
    }

    /// Trims text fields and rejects an empty title.
    pub fn normalized(mut self) -> Result<Self, TaskValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        self.title = title.to_string();
        self.description = self.description.trim().to_string();
        Ok(self)
    }
}

/// Canonical task record.
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`) to keep the
/// persisted payload compatible with boards saved by earlier front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Empty string means "no description".
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub column: ColumnId,
    /// Informational only.
    #[serde(default, deserialize_with = "lenient_count")]
    pub comments: u32,
    /// Informational only.
    #[serde(default, deserialize_with = "lenient_count")]
    pub attachments: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a task from already-normalized fields.
    pub fn new(id: TaskId, fields: TaskFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            column: fields.column,
            comments: fields.comments,
            attachments: fields.attachments,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field and refreshes `updated_at`.
    pub fn apply(&mut self, fields: TaskFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.description = fields.description;
        self.priority = fields.priority;
        self.column = fields.column;
        self.comments = fields.comments;
        self.attachments = fields.attachments;
        self.touch(now);
    }

    /// Moves the task to another column and refreshes `updated_at`.
    pub fn move_to(&mut self, column: ColumnId, now: DateTime<Utc>) {
        self.column = column;
        self.touch(now);
    }

    /// Snapshot of the editable fields, used to prefill the edit form.
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            column: self.column.clone(),
            comments: self.comments,
            attachments: self.attachments,
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    // Clocks are not guaranteed monotonic; never move `updated_at` backwards.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }
}

// Older payloads may carry null or negative counts.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value
        .map(|count| u32::try_from(count.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0))
}
