//! shortcuts-mcp - MCP tool server for grocery prices, recipes and macOS Shortcuts
//!
//! Runs as an MCP server over stdio by default. Every tool is also reachable
//! as a subcommand for use from a terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;
use shortcuts_mcp::commands::{CompareCommand, RecipeCommand, ShortcutAction, ShortcutCommand};
use shortcuts_mcp::config::{Config, OutputFormat};
use shortcuts_mcp::server::ShortcutsServerHandler;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shortcuts-mcp",
    version,
    about = "MCP tool server for macOS Shortcuts, recipes and grocery prices",
    long_about = "Serves grocery price comparison, recipe extraction and macOS Shortcuts tools over MCP stdio, or runs them directly from the command line."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format for CLI commands
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SHORTCUTS_PROXY")]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over MCP stdio (default)
    Serve,

    /// Compare grocery prices between Coles and Woolworths
    #[command(alias = "c")]
    Compare {
        /// Items, optionally with a trailing weight (e.g. "garlic 100g")
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Extract the ingredients of a recipe
    #[command(alias = "r")]
    Recipe {
        /// Recipe URL
        url: String,
    },

    /// Add a calendar event
    Event {
        title: String,
        /// Start, e.g. "31/05/2025 14:30"
        start: String,
        /// End, e.g. "31/05/2025 15:30"
        end: String,
    },

    /// Save a note
    Note { summary: String },

    /// Add comma-separated items to the groceries list
    List { items: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the MCP transport
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Starting shortcuts MCP server");

            let handler = ShortcutsServerHandler::new(&config)
                .context("Failed to create server handler")?;
            let service = handler.serve(stdio()).await.context("Failed to start MCP server")?;
            service.waiting().await?;
        }

        Commands::Compare { items } => {
            let output = CompareCommand::new(config).execute(&items).await?;
            println!("{}", output);
        }

        Commands::Recipe { url } => {
            let output = RecipeCommand::new(config).execute(&url).await?;
            println!("{}", output);
        }

        Commands::Event { title, start, end } => {
            let action = ShortcutAction::Event { title, start, end };
            println!("{}", ShortcutCommand::new(config).execute(action).await?);
        }

        Commands::Note { summary } => {
            let action = ShortcutAction::Note { summary };
            println!("{}", ShortcutCommand::new(config).execute(action).await?);
        }

        Commands::List { items } => {
            let action = ShortcutAction::List { items };
            println!("{}", ShortcutCommand::new(config).execute(action).await?);
        }
    }

    Ok(())
}
