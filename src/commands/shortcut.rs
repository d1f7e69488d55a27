//! Shortcut tool commands (event, note, groceries list).

use crate::config::{Config, OutputFormat};
use crate::reply::ToolReply;
use crate::shortcuts::{ShortcutRunner, Shortcuts, ShortcutsCli};
use anyhow::Result;

/// One Shortcuts-backed action.
#[derive(Debug, Clone)]
pub enum ShortcutAction {
    Event { title: String, start: String, end: String },
    Note { summary: String },
    List { items: String },
}

/// Runs a Shortcuts-backed tool from the command line.
pub struct ShortcutCommand {
    config: Config,
}

impl ShortcutCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the action through the configured `shortcuts` binary.
    pub async fn execute(&self, action: ShortcutAction) -> Result<String> {
        let runner = ShortcutsCli::from_config(&self.config);
        self.execute_with_runner(runner, action).await
    }

    /// Executes the action with a provided runner (for testing).
    pub async fn execute_with_runner(
        &self,
        runner: impl ShortcutRunner,
        action: ShortcutAction,
    ) -> Result<String> {
        let shortcuts = Shortcuts::new(runner);

        let reply = match &action {
            ShortcutAction::Event { title, start, end } => {
                shortcuts.create_event(title, start, end).await
            }
            ShortcutAction::Note { summary } => shortcuts.create_note(summary).await,
            ShortcutAction::List { items } => shortcuts.create_list(items).await,
        };

        if let OutputFormat::Json = self.config.format {
            return Ok(serde_json::to_string_pretty(&reply)?);
        }

        describe(&action, reply)
    }
}

fn describe(action: &ShortcutAction, reply: ToolReply) -> Result<String> {
    if !reply.is_success() {
        anyhow::bail!("{}", reply.message.unwrap_or_else(|| "Shortcut failed".to_string()));
    }

    Ok(match action {
        ShortcutAction::Event { title, start, end } => {
            format!("Added event \"{}\" ({} to {})", title, start, end)
        }
        ShortcutAction::Note { .. } => "Saved note".to_string(),
        ShortcutAction::List { items } => format!("Added to groceries list: {}", items),
    })
}
