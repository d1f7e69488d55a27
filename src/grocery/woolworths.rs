//! Woolworths search client.

use super::client::{browser_get, GrocerySearch};
use super::models::{ProductQuote, Retailer};
use crate::config::Config;
use crate::http::{build_client, fetch_text};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use wreq::Client;

const ACCEPT_JSON: &str = "application/json, text/plain, */*";

/// Woolworths HTTP client.
pub struct WoolworthsClient {
    client: Client,
    base_url: String,
}

impl WoolworthsClient {
    /// Creates a client for the configured Woolworths base URL.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.woolworths_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GrocerySearch for WoolworthsClient {
    fn retailer(&self) -> Retailer {
        Retailer::Woolworths
    }

    async fn search(&self, term: &str) -> Result<Option<ProductQuote>> {
        let url = format!(
            "{}/apis/ui/Search/products?searchTerm={}",
            self.base_url,
            urlencoding::encode(term)
        );

        info!("Searching Woolworths: {}", term);
        debug!("GET {}", url);
        let body =
            fetch_text(browser_get(&self.client, &url, ACCEPT_JSON), Retailer::Woolworths).await?;
        parse_search_results(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Products", default)]
    products: Option<Vec<ProductSection>>,
}

#[derive(Debug, Deserialize)]
struct ProductSection {
    #[serde(rename = "Products", default)]
    products: Option<Vec<Product>>,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "DisplayName", default)]
    display_name: Option<String>,
    #[serde(rename = "Price", default)]
    price: Option<f64>,
    #[serde(rename = "CupString", default)]
    cup_string: Option<String>,
    #[serde(rename = "IsWeighted", default)]
    is_weighted: Option<bool>,
    #[serde(rename = "Unit", default)]
    unit: Option<String>,
}

impl Product {
    fn display_name(&self) -> Option<&str> {
        [self.name.as_deref(), self.display_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|n| !n.is_empty())
    }

    /// Loose produce is sold per kilogram.
    fn sold_by_weight(&self) -> bool {
        self.is_weighted.unwrap_or(false)
            || self.unit.as_deref().is_some_and(|u| u.eq_ignore_ascii_case("kg"))
    }
}

/// Picks the first named, priced product out of a Woolworths search response.
pub fn parse_search_results(json: &str) -> Result<Option<ProductQuote>> {
    let response: SearchResponse =
        serde_json::from_str(json).context("Failed to parse Woolworths search response")?;

    let products = response
        .products
        .unwrap_or_default()
        .into_iter()
        .flat_map(|section| section.products.unwrap_or_default());

    for product in products {
        let (Some(name), Some(price)) = (product.display_name(), product.price) else {
            continue;
        };

        return Ok(Some(ProductQuote {
            description: name.to_string(),
            unit_price: price,
            unit_label: product.cup_string.clone().unwrap_or_default(),
            is_weighted: product.sold_by_weight(),
        }));
    }

    Ok(None)
}
