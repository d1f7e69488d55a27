//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const COLES_BASE: &str = "https://www.coles.com.au";
pub const WOOLWORTHS_BASE: &str = "https://www.woolworths.com.au";
pub const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format for CLI commands
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_coles_base_url")]
    pub coles_base_url: String,

    #[serde(default = "default_woolworths_base_url")]
    pub woolworths_base_url: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Gemini model used for recipe extraction
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Gemini API key. Usually supplied via GEMINI_API_KEY. Never serialized.
    #[serde(default, skip_serializing)]
    pub gemini_api_key: Option<String>,

    /// Path or name of the macOS `shortcuts` binary
    #[serde(default = "default_shortcuts_bin")]
    pub shortcuts_bin: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_coles_base_url() -> String {
    COLES_BASE.to_string()
}

fn default_woolworths_base_url() -> String {
    WOOLWORTHS_BASE.to_string()
}

fn default_gemini_base_url() -> String {
    GEMINI_BASE.to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_shortcuts_bin() -> String {
    "shortcuts".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            coles_base_url: default_coles_base_url(),
            woolworths_base_url: default_woolworths_base_url(),
            gemini_base_url: default_gemini_base_url(),
            gemini_model: default_gemini_model(),
            gemini_api_key: None,
            shortcuts_bin: default_shortcuts_bin(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("shortcuts-mcp").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(proxy) = lookup("SHORTCUTS_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Some(bin) = lookup("SHORTCUTS_BIN") {
            self.shortcuts_bin = bin;
        }

        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.gemini_api_key = Some(key);
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            self.gemini_model = model;
        }

        self
    }
}

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
