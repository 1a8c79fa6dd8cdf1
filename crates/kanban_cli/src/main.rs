//! `kanban` terminal front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the board database.
//! - Translate one subcommand into board commands and print the result.

mod cli;
mod config;
mod output;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, FieldArgs};
use config::CliConfig;
use kanban_core::{
    init_logging, open_db, AlwaysConfirm, BoardCommand, BoardSession, BoardStore, ColumnId,
    ConfirmPrompt, DragEvent, FormInput, KvStore, LoadSource, Notice, SqliteKvStore,
    TaskRepository, BOARD_COLUMNS,
};
use log::{info, warn};
use mockable::{Clock, DefaultClock};
use prompt::TerminalPrompt;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = CliConfig::resolve(&cli)?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let command = cli.command.unwrap_or(Command::Show);
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create `{}`", parent.display()))?;
    }
    let conn = open_db(&config.db_path)
        .with_context(|| format!("cannot open board at `{}`", config.db_path.display()))?;
    let prompt: Box<dyn ConfirmPrompt> = match command {
        Command::Delete { yes: true, .. } => Box::new(AlwaysConfirm),
        _ => Box::new(TerminalPrompt),
    };
    let repo = TaskRepository::new(BoardStore::new(SqliteKvStore::new(&conn)), DefaultClock);
    let mut session = BoardSession::new(repo, prompt);

    let report = session.start();
    info!(
        "event=cli_start module=cli status=ok tasks={} db={}",
        report.task_count,
        config.db_path.display()
    );
    if matches!(report.source, LoadSource::FirstRun) {
        println!("New board created with example tasks.");
    }
    if let Some(notice) = session.notice() {
        eprintln!("{}", output::notice_text(notice));
    }

    let notice = execute(&mut session, command);
    match &notice {
        Some(notice) if notice.is_error() => {
            eprintln!("{}", output::notice_text(notice));
            Ok(ExitCode::FAILURE)
        }
        Some(notice) => {
            println!("{}", output::notice_text(notice));
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn execute<S: KvStore, C: Clock>(
    session: &mut BoardSession<S, C>,
    command: Command,
) -> Option<Notice> {
    match command {
        Command::Show => {
            print!("{}", output::board_text(session.view()));
            None
        }
        Command::Columns => {
            print!("{}", output::columns_text(&BOARD_COLUMNS));
            None
        }
        Command::Add { title, fields } => {
            let column = fields.column.as_deref().map(ColumnId::new);
            session.dispatch(BoardCommand::OpenCreate { column });
            let mut input = session.form().fields().clone();
            input.title = title;
            apply_overrides(&mut input, fields);
            session.dispatch(BoardCommand::SubmitForm(input))
        }
        Command::Edit { id, title, fields } => {
            if let Some(notice) = session.dispatch(BoardCommand::OpenEdit(id)) {
                return Some(notice);
            }
            let mut input = session.form().fields().clone();
            if let Some(title) = title {
                input.title = title;
            }
            apply_overrides(&mut input, fields);
            session.dispatch(BoardCommand::SubmitForm(input))
        }
        Command::Delete { id, .. } => {
            let before = session.repo().len();
            let notice = session.dispatch(BoardCommand::Delete(id));
            if notice.is_none() && session.repo().len() == before {
                println!("Delete cancelled.");
            }
            notice
        }
        Command::Move { id, column } => {
            let column = ColumnId::new(column);
            let generation = session.view().generation;
            session.dispatch(BoardCommand::Drag(DragEvent::Start {
                task_id: id,
                generation,
            }));
            session.dispatch(BoardCommand::Drag(DragEvent::Enter(column.clone())));
            let notice = session.dispatch(BoardCommand::Drag(DragEvent::Drop(column.clone())));
            if notice.is_none() {
                warn!("event=cli_move module=cli status=skip task_id={id} column={column}");
                println!("Task #{id} is already in column {column}.");
            }
            notice
        }
    }
}

/// Copies the options the user actually passed onto the form values.
fn apply_overrides(input: &mut FormInput, fields: FieldArgs) {
    let FieldArgs {
        description,
        priority,
        column,
        comments,
        attachments,
    } = fields;
    let targets = [
        (description, &mut input.description),
        (priority, &mut input.priority),
        (column, &mut input.column),
        (comments, &mut input.comments),
        (attachments, &mut input.attachments),
    ];
    for (value, target) in targets {
        if let Some(value) = value {
            *target = value;
        }
    }
}
