//! Runtime configuration resolved from arguments, environment and defaults.

use crate::cli::Cli;
use anyhow::{bail, Context, Result};
use kanban_core::default_log_level;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "kanban";
const DB_FILE_NAME: &str = "board.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl CliConfig {
    /// Explicit options win; otherwise paths live under the data directory.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let app_dir = || -> Result<PathBuf> {
            let base = dirs::data_dir().context("could not determine the data directory")?;
            Ok(base.join(APP_DIR_NAME))
        };

        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => app_dir()?.join(DB_FILE_NAME),
        };
        let log_dir = match &cli.log_dir {
            Some(path) => path.clone(),
            None => app_dir()?.join(LOG_DIR_NAME),
        };
        if !log_dir.is_absolute() {
            bail!("log directory must be absolute, got `{}`", log_dir.display());
        }
        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
