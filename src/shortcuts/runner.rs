//! Runs macOS Shortcuts through the `shortcuts` command-line tool.

use crate::config::Config;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ShortcutError {
    #[error("Failed to run shortcut: {0}")]
    Failed(String),
    #[error("Shortcut timed out after {0:?}")]
    TimedOut(Duration),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for running a named shortcut with text input - enables mocking for tests.
#[async_trait]
pub trait ShortcutRunner: Send + Sync {
    /// Runs `shortcut`, feeding `input` on stdin.
    async fn run(&self, shortcut: &str, input: &str) -> Result<(), ShortcutError>;
}

/// Invokes `<binary> run "<shortcut>"` as a child process.
pub struct ShortcutsCli {
    binary: String,
    timeout: Option<Duration>,
}

impl ShortcutsCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into(), timeout: None }
    }

    /// Uses the configured binary, bounded by the configured timeout.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.shortcuts_bin.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    /// Kills the shortcut if it has not finished within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    async fn execute(&self, shortcut: &str, input: &str) -> Result<(), ShortcutError> {
        let mut child = Command::new(&self.binary)
            .arg("run")
            .arg(shortcut)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child.stdin.take();

        // Input is newline-terminated, like a shell here-string. Written while
        // output is drained so a chatty child cannot fill its pipes and stall.
        let write = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            stdin.write_all(input.as_bytes()).await?;
            stdin.write_all(b"\n").await
            // stdin dropped here, closing the pipe
        };

        let (written, output) = tokio::join!(write, child.wait_with_output());

        if let Err(e) = written {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        let output = output?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ShortcutError::Failed(stderr));
        }

        Ok(())
    }
}

impl Default for ShortcutsCli {
    fn default() -> Self {
        Self::new("shortcuts")
    }
}

#[async_trait]
impl ShortcutRunner for ShortcutsCli {
    async fn run(&self, shortcut: &str, input: &str) -> Result<(), ShortcutError> {
        debug!("{} run \"{}\" ({} bytes of input)", self.binary, shortcut, input.len());

        match self.timeout {
            // Dropping the timed-out future drops the child, which kills it
            Some(limit) => tokio::time::timeout(limit, self.execute(shortcut, input))
                .await
                .map_err(|_| ShortcutError::TimedOut(limit))?,
            None => self.execute(shortcut, input).await,
        }
    }
}
