//! Recipe ingredient extraction through the Gemini API.

mod models;

pub use models::{extraction_request, Ingredient};

use crate::config::Config;
use crate::http::{build_client, fetch_text};
use anyhow::{Context, Result};
use models::GenerateContentResponse;
use thiserror::Error;
use tracing::{debug, info, warn};
use wreq::Client;

const PROMPT: &str = "Extract the ingredients and its quantities (by weight or just by number)";

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("Gemini returned no content")]
    EmptyResponse,
    #[error("Invalid ingredient list: {0}")]
    InvalidIngredients(#[from] serde_json::Error),
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// Gemini-backed recipe reader.
pub struct RecipeClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl RecipeClient {
    /// Creates a client. A missing API key only fails individual calls.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    /// Asks the model for the ingredients of the recipe at `url`.
    pub async fn extract_ingredients(&self, url: &str) -> Result<Vec<Ingredient>, RecipeError> {
        let api_key = self.api_key.as_deref().ok_or(RecipeError::MissingApiKey)?;

        let endpoint = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = serde_json::to_string(&extraction_request(url, PROMPT))
            .context("Failed to encode Gemini request")?;

        info!("Extracting recipe ingredients: {}", url);
        debug!("POST {}", endpoint);

        let request = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", api_key)
            .body(body);

        let text = fetch_text(request, "Gemini").await?;
        let response: GenerateContentResponse =
            serde_json::from_str(&text).context("Failed to parse Gemini response")?;

        let payload = response.text().ok_or(RecipeError::EmptyResponse)?;
        let ingredients: Vec<Ingredient> = serde_json::from_str(&payload)?;

        info!("Extracted {} ingredients", ingredients.len());
        Ok(ingredients)
    }

    /// Tool entry point: a JSON array of `{name, quantity}` or an error string.
    pub async fn get_recipe(&self, url: &str) -> String {
        let result = self.extract_ingredients(url).await.and_then(|ingredients| {
            serde_json::to_string(&ingredients).map_err(RecipeError::from)
        });

        match result {
            Ok(json) => json,
            Err(RecipeError::MissingApiKey) => {
                warn!("Recipe requested without GEMINI_API_KEY");
                format!("Error: {}", RecipeError::MissingApiKey)
            }
            Err(e) => {
                warn!("Recipe extraction failed: {:#}", e);
                format!("Error processing recipe: {:#}", e)
            }
        }
    }
}
