//! Grocery comparison command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::grocery::{compare_grocery_prices, ColesClient, GrocerySearch, WoolworthsClient};
use anyhow::{Context, Result};
use tracing::info;

/// Compares item prices between Coles and Woolworths.
pub struct CompareCommand {
    config: Config,
}

impl CompareCommand {
    /// Creates a new compare command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the comparison and returns formatted output.
    pub async fn execute(&self, items: &[String]) -> Result<String> {
        let coles = ColesClient::new(&self.config).context("Failed to create Coles client")?;
        let woolworths =
            WoolworthsClient::new(&self.config).context("Failed to create Woolworths client")?;

        self.execute_with_clients(&coles, &woolworths, items).await
    }

    /// Executes the comparison with provided clients (for testing).
    pub async fn execute_with_clients(
        &self,
        coles: &impl GrocerySearch,
        woolworths: &impl GrocerySearch,
        items: &[String],
    ) -> Result<String> {
        info!("Comparing {} items", items.len());

        let result = compare_grocery_prices(coles, woolworths, items).await;

        Ok(Formatter::new(self.config.format).format_comparison(&result))
    }
}
