//! MCP server handler implementation.

use std::sync::Arc;

use anyhow::Result;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::schemars::{self, JsonSchema};
use rmcp::ErrorData as McpError;
use rmcp::{tool, tool_handler, tool_router};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::grocery::{self, ColesClient, WoolworthsClient};
use crate::recipe::RecipeClient;
use crate::shortcuts::{Shortcuts, ShortcutsCli};

/// The shortcuts-mcp server handler.
#[derive(Clone)]
pub struct ShortcutsServerHandler {
    /// Long-lived so its build identifier survives across calls.
    coles: Arc<ColesClient>,
    woolworths: Arc<WoolworthsClient>,
    shortcuts: Arc<Shortcuts<ShortcutsCli>>,
    recipe: Arc<RecipeClient>,
    tool_router: ToolRouter<Self>,
}

impl ShortcutsServerHandler {
    /// Creates a handler with clients built from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_clients(
            ColesClient::new(config)?,
            WoolworthsClient::new(config)?,
            Shortcuts::new(ShortcutsCli::from_config(config)),
            RecipeClient::new(config)?,
        ))
    }

    /// Creates a handler from pre-built clients.
    pub fn with_clients(
        coles: ColesClient,
        woolworths: WoolworthsClient,
        shortcuts: Shortcuts<ShortcutsCli>,
        recipe: RecipeClient,
    ) -> Self {
        Self {
            coles: Arc::new(coles),
            woolworths: Arc::new(woolworths),
            shortcuts: Arc::new(shortcuts),
            recipe: Arc::new(recipe),
            tool_router: Self::tool_router(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompareInput {
    #[schemars(
        description = "Grocery items to price. Each may end in a weight such as \"garlic 100g\" or \"beef mince 1kg\""
    )]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventInput {
    #[schemars(description = "Title of the event")]
    pub title: String,
    #[schemars(description = "Start date and time, e.g. \"31/05/2025 14:30\"")]
    pub start: String,
    #[schemars(description = "End date and time, e.g. \"31/05/2025 15:30\"")]
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NoteInput {
    #[schemars(description = "Content of the note")]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListInput {
    #[schemars(description = "Comma-separated items, e.g. \"item 1 500g, item 2 2x\"")]
    pub items: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecipeInput {
    #[schemars(description = "URL or file URI of the recipe")]
    pub url: String,
}

/// Serializes a tool payload, flagging the call as an error when it failed.
fn json_result<T: Serialize>(value: &T, ok: bool) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;

    let content = vec![Content::text(text)];
    Ok(if ok { CallToolResult::success(content) } else { CallToolResult::error(content) })
}

#[tool_router]
impl ShortcutsServerHandler {
    #[tool(
        description = "Compare grocery prices between Coles and Woolworths. Items may carry a trailing weight (\"garlic 100g\"); loose produce is priced for that weight. Returns per-item matches, totals, the cheaper store and the savings."
    )]
    async fn compare_grocery_prices(
        &self,
        input: Parameters<CompareInput>,
    ) -> Result<CallToolResult, McpError> {
        let result =
            grocery::compare_grocery_prices(&*self.coles, &*self.woolworths, &input.0.items).await;
        json_result(&result, result.is_success())
    }

    #[tool(description = "Add a calendar event via the \"Add New Event\" shortcut.")]
    async fn create_event(&self, input: Parameters<EventInput>) -> Result<CallToolResult, McpError> {
        let EventInput { title, start, end } = input.0;
        let reply = self.shortcuts.create_event(&title, &start, &end).await;
        json_result(&reply, reply.is_success())
    }

    #[tool(description = "Save a summary of the conversation as a note via the \"Claude Notes\" shortcut.")]
    async fn create_note(&self, input: Parameters<NoteInput>) -> Result<CallToolResult, McpError> {
        let reply = self.shortcuts.create_note(&input.0.summary).await;
        json_result(&reply, reply.is_success())
    }

    #[tool(
        description = "Add ingredients to the groceries list. Pass the ingredients from get_recipe as one comma-separated string, e.g. \"item 1 500g, item 2 2x\"."
    )]
    async fn create_list(&self, input: Parameters<ListInput>) -> Result<CallToolResult, McpError> {
        let reply = self.shortcuts.create_list(&input.0.items).await;
        json_result(&reply, reply.is_success())
    }

    #[tool(
        description = "Extract the ingredients and quantities from a recipe URL. Returns a JSON list of {name, quantity}."
    )]
    async fn get_recipe(&self, input: Parameters<RecipeInput>) -> Result<CallToolResult, McpError> {
        let text = self.recipe.get_recipe(&input.0.url).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for ShortcutsServerHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Shortcuts MCP: everyday helpers backed by macOS Shortcuts and Australian supermarkets.\n\n\
                 Tools:\n\
                 • get_recipe: ingredients of a recipe URL\n\
                 • create_list: add ingredients to the groceries list\n\
                 • compare_grocery_prices: Coles vs Woolworths for a list of items\n\
                 • create_event: add a calendar event\n\
                 • create_note: save a note"
                    .to_string(),
            ),
        }
    }
}
