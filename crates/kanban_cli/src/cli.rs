//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kanban")]
#[command(version, about = "Five-column task board kept in a local database")]
pub struct Cli {
    /// Board database file. Defaults to the platform data directory.
    #[arg(long, global = true, env = "KANBAN_DB")]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, env = "KANBAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true, env = "KANBAN_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the board (default)
    Show,
    /// List the fixed columns and their identifiers
    Columns,
    /// Create a task
    Add {
        title: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Edit a task; omitted options keep their current value
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a task after confirmation
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Drag a task onto another column
    Move { id: u64, column: String },
}

/// Optional task fields shared by `add` and `edit`; raw text like form input.
#[derive(Debug, Args)]
pub struct FieldArgs {
    #[arg(short, long)]
    pub description: Option<String>,
    /// low|medium|high
    #[arg(short, long)]
    pub priority: Option<String>,
    /// Column identifier (see `kanban columns`)
    #[arg(short, long)]
    pub column: Option<String>,
    #[arg(long)]
    pub comments: Option<String>,
    #[arg(long)]
    pub attachments: Option<String>,
}
