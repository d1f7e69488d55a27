//! shortcuts-mcp - MCP tool server for everyday assistant tasks
//!
//! Compares Australian grocery prices between Coles and Woolworths, extracts
//! recipe ingredients through Gemini, and drives macOS Shortcuts for calendar
//! events, notes and the groceries list.

pub mod commands;
pub mod config;
pub mod format;
pub mod grocery;
pub mod http;
pub mod recipe;
pub mod reply;
pub mod server;
pub mod shortcuts;

pub use config::Config;
pub use grocery::{compare_grocery_prices, ComparisonResult};
pub use reply::{Status, ToolReply};
pub use server::ShortcutsServerHandler;
