//! Calendar, notes and groceries-list tools backed by macOS Shortcuts.

mod runner;

pub use runner::{ShortcutError, ShortcutRunner, ShortcutsCli};

use crate::reply::ToolReply;
use tracing::{error, info};

/// Shortcut that adds a calendar event from "title, start, end".
pub const ADD_EVENT: &str = "Add New Event";
/// Shortcut that saves a note.
pub const CREATE_NOTE: &str = "Claude Notes";
/// Shortcut that appends comma-separated items to the groceries list.
pub const ADD_TO_GROCERIES: &str = "Add Items to Groceries List";

/// The Shortcuts-backed tools.
pub struct Shortcuts<R: ShortcutRunner> {
    runner: R,
}

impl<R: ShortcutRunner> Shortcuts<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Adds a calendar event. `start` and `end` are passed through as given,
    /// e.g. "31/05/2025 14:30".
    pub async fn create_event(&self, title: &str, start: &str, end: &str) -> ToolReply {
        let payload = format!("{}, {}, {}", title, start, end);
        let result = self.runner.run(ADD_EVENT, &payload).await.map(|_| {
            info!("Created event: {}", title);
            ToolReply::success()
        });
        self.reply(ADD_EVENT, result)
    }

    /// Saves a conversation summary as a note.
    pub async fn create_note(&self, summary: &str) -> ToolReply {
        let result = self.runner.run(CREATE_NOTE, summary).await.map(|_| {
            info!("Created note");
            ToolReply::success()
        });
        self.reply(CREATE_NOTE, result)
    }

    /// Adds comma-separated items, e.g. "flour 500g, eggs 2x", to the groceries list.
    pub async fn create_list(&self, items: &str) -> ToolReply {
        let result = self.runner.run(ADD_TO_GROCERIES, items).await.map(|_| {
            info!("Added items to groceries list: {}", items);
            ToolReply::success().with_ingredients(items)
        });
        self.reply(ADD_TO_GROCERIES, result)
    }

    fn reply(&self, shortcut: &str, result: Result<ToolReply, ShortcutError>) -> ToolReply {
        if let Err(e) = &result {
            error!("Shortcut \"{}\" failed: {}", shortcut, e);
        }
        ToolReply::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Status;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock runner that records invocations.
    #[derive(Default)]
    struct MockRunner {
        calls: Mutex<Vec<(String, String)>>,
        fail_with: Option<String>,
    }

    impl MockRunner {
        fn failing(stderr: &str) -> Self {
            Self { calls: Mutex::new(Vec::new()), fail_with: Some(stderr.to_string()) }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ShortcutRunner for MockRunner {
        async fn run(&self, shortcut: &str, input: &str) -> Result<(), ShortcutError> {
            self.calls.lock().unwrap().push((shortcut.to_string(), input.to_string()));
            match &self.fail_with {
                Some(stderr) => Err(ShortcutError::Failed(stderr.clone())),
                None => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn test_create_event_joins_payload() {
        let tools = Shortcuts::new(MockRunner::default());
        let reply = tools.create_event("Dentist", "31/05/2025 14:30", "31/05/2025 15:30").await;

        assert_eq!(reply, ToolReply::success());
        assert_eq!(
            tools.runner.calls(),
            vec![(
                "Add New Event".to_string(),
                "Dentist, 31/05/2025 14:30, 31/05/2025 15:30".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_create_note() {
        let tools = Shortcuts::new(MockRunner::default());
        let reply = tools.create_note("We discussed the quarterly plan.").await;

        assert!(reply.is_success());
        assert!(reply.ingredients_added.is_none());
        assert_eq!(tools.runner.calls()[0].0, "Claude Notes");
        assert_eq!(tools.runner.calls()[0].1, "We discussed the quarterly plan.");
    }

    #[tokio::test]
    async fn test_create_list_reports_items() {
        let tools = Shortcuts::new(MockRunner::default());
        let reply = tools.create_list("flour 500g, eggs 2x").await;

        assert!(reply.is_success());
        assert_eq!(reply.ingredients_added.as_deref(), Some("flour 500g, eggs 2x"));
        assert_eq!(tools.runner.calls()[0].0, "Add Items to Groceries List");
    }

    #[tokio::test]
    async fn test_failure_becomes_failed_reply() {
        let tools = Shortcuts::new(MockRunner::failing("The shortcut could not be found."));
        let reply = tools.create_list("milk").await;

        assert_eq!(reply.status, Status::Failed);
        assert_eq!(
            reply.message.as_deref(),
            Some("Failed to run shortcut: The shortcut could not be found.")
        );
        assert!(reply.ingredients_added.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cli_runner_missing_binary() {
        let tools = Shortcuts::new(ShortcutsCli::new("/nonexistent/shortcuts-binary"));
        let reply = tools.create_note("hello").await;

        assert_eq!(reply.status, Status::Failed);
        assert!(reply.message.unwrap().starts_with("Server error"));
    }
}
