//! Example board shown on first run.

use crate::model::task::{Priority, Task, TaskFields, TaskId};
use chrono::{DateTime, Utc};

/// Counter value after seeding the example tasks.
pub const EXAMPLE_NEXT_ID: TaskId = 7;

/// Six deterministic tasks: two in column 1, one in each of columns 2-5.
pub fn example_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let seeds = [
        (
            "Ship the dark theme for the dashboard",
            "Build a modern dark interface that is easier on the eyes",
            Priority::High,
            "1",
            3,
            2,
        ),
        (
            "Fix responsive layout bugs",
            "Make the layout behave on phones and tablets",
            Priority::Medium,
            "1",
            5,
            1,
        ),
        (
            "Build drag and drop between columns",
            "Let cards be picked up and dropped onto any column",
            Priority::High,
            "2",
            8,
            4,
        ),
        (
            "Update the API documentation",
            "Review every endpoint and add practical examples",
            Priority::Low,
            "3",
            1,
            6,
        ),
        (
            "Set up the production environment",
            "Configure server, database and deploy pipeline",
            Priority::High,
            "4",
            12,
            5,
        ),
        (
            "Plan the next sprint",
            "Pick tasks and set priorities for the next two weeks",
            Priority::Medium,
            "5",
            15,
            3,
        ),
    ];

    seeds
        .into_iter()
        .zip(1..)
        .map(
            |((title, description, priority, column, comments, attachments), id)| {
                let fields = TaskFields::titled(title)
                    .with_description(description)
                    .with_priority(priority)
                    .with_column(column)
                    .with_counts(comments, attachments);
                Task::new(id, fields, now)
            },
        )
        .collect()
}
