//! Status replies returned to the tool host.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Outcome status reported to the tool host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

/// `{status, message?, ingredients_added?}` reply of the shortcut tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReply {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_added: Option<String>,
}

impl ToolReply {
    pub fn success() -> Self {
        Self { status: Status::Success, message: None, ingredients_added: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { status: Status::Failed, message: Some(message.into()), ingredients_added: None }
    }

    /// Records the items handed to the groceries list.
    pub fn with_ingredients(mut self, items: impl Into<String>) -> Self {
        self.ingredients_added = Some(items.into());
        self
    }

    /// Converts an operation result into a reply; errors become `failed`.
    pub fn from_result<E: Display>(result: Result<ToolReply, E>) -> Self {
        result.unwrap_or_else(|e| Self::failed(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
