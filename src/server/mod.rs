//! MCP server exposing the grocery, recipe and Shortcuts tools.
//!
//! Every tool reports domain failures inside its JSON payload (`status` and
//! `message`), so a failing tool call never surfaces as a protocol error.
//!
//! # Example
//!
//! ```ignore
//! use rmcp::service::ServiceExt;
//! use rmcp::transport::io::stdio;
//! use shortcuts_mcp::server::ShortcutsServerHandler;
//!
//! let handler = ShortcutsServerHandler::new(&config)?;
//! handler.serve(stdio()).await?.waiting().await?;
//! ```

pub mod handler;

pub use handler::ShortcutsServerHandler;
