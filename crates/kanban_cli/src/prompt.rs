//! Terminal confirmation prompt.

use dialoguer::Confirm;
use kanban_core::ConfirmPrompt;

/// Asks on the terminal; any prompt failure counts as "no".
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
