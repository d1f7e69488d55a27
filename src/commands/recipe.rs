//! Recipe command implementation.

use crate::config::{Config, OutputFormat};
use crate::recipe::RecipeClient;
use anyhow::Result;

/// Prints the ingredients of a recipe.
pub struct RecipeCommand {
    config: Config,
}

impl RecipeCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the extraction and returns formatted output.
    pub async fn execute(&self, url: &str) -> Result<String> {
        let client = RecipeClient::new(&self.config)?;

        if let OutputFormat::Json = self.config.format {
            return Ok(client.get_recipe(url).await);
        }

        let ingredients = client.extract_ingredients(url).await?;
        if ingredients.is_empty() {
            return Ok("No ingredients found.".to_string());
        }

        let lines: Vec<String> = match self.config.format {
            OutputFormat::Markdown => ingredients
                .iter()
                .map(|i| format!("- **{}**: {}", i.name, i.quantity))
                .collect(),
            _ => ingredients.iter().map(|i| format!("{:<30}  {}", i.name, i.quantity)).collect(),
        };

        Ok(lines.join("\n"))
    }
}
