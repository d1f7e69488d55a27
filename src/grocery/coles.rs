//! Coles search client.
//!
//! Coles serves search results through its Next.js data routes, which are
//! keyed by a build identifier embedded in the landing page. The identifier
//! is fetched once per client and reused for every search.

use super::client::{browser_get, GrocerySearch};
use super::models::{ProductQuote, Retailer};
use super::normalize::per_kg_price;
use crate::config::Config;
use crate::http::{build_client, fetch_text};
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use wreq::Client;

const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";
const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

static NEXT_DATA: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script#__NEXT_DATA__").unwrap());

/// Coles HTTP client with a memoized build identifier.
pub struct ColesClient {
    client: Client,
    base_url: String,
    build_id: OnceCell<String>,
    delay_min_ms: u64,
    delay_max_ms: u64,
}

impl ColesClient {
    /// Creates a client for the configured Coles base URL.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.coles_base_url.trim_end_matches('/').to_string(),
            build_id: OnceCell::new(),
            delay_min_ms: 1500,
            delay_max_ms: 3500,
        })
    }

    /// Overrides the pre-search delay window.
    pub fn set_delay(&mut self, min_ms: u64, max_ms: u64) {
        self.delay_min_ms = min_ms;
        self.delay_max_ms = max_ms.max(min_ms);
    }

    /// Returns the build identifier, fetching it on first use.
    ///
    /// Never invalidated: if Coles rotates it, searches fail until restart.
    pub async fn build_id(&self) -> Result<&str> {
        let id = self
            .build_id
            .get_or_try_init(|| async {
                let url = format!("{}/", self.base_url);
                info!("Fetching Coles build id");
                let html = fetch_text(browser_get(&self.client, &url, ACCEPT_HTML), Retailer::Coles)
                    .await
                    .context("Failed to fetch Coles landing page")?;
                extract_build_id(&html)
            })
            .await?;

        Ok(id.as_str())
    }

    /// Sleeps for a random interval to look less like a bot.
    async fn delay(&self) {
        if self.delay_max_ms == 0 {
            return;
        }

        let ms = rand::random_range(self.delay_min_ms..=self.delay_max_ms);
        debug!("Delaying {}ms before Coles search", ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[async_trait]
impl GrocerySearch for ColesClient {
    fn retailer(&self) -> Retailer {
        Retailer::Coles
    }

    async fn prepare(&self) -> Result<()> {
        self.build_id().await.map(|_| ())
    }

    async fn search(&self, term: &str) -> Result<Option<ProductQuote>> {
        let build_id = self.build_id().await?;
        self.delay().await;

        let url = format!(
            "{}/_next/data/{}/en/search/products.json?q={}",
            self.base_url,
            build_id,
            urlencoding::encode(term)
        );

        info!("Searching Coles: {}", term);
        debug!("GET {}", url);
        let body = fetch_text(browser_get(&self.client, &url, ACCEPT_JSON), Retailer::Coles).await?;
        parse_search_results(&body)
    }
}

/// Pulls `buildId` out of the page's `__NEXT_DATA__` script.
pub fn extract_build_id(html: &str) -> Result<String> {
    let document = Html::parse_document(html);

    let script = document
        .select(&NEXT_DATA)
        .next()
        .context("Could not locate __NEXT_DATA__ in Coles HTML")?;

    let payload: serde_json::Value = serde_json::from_str(&script.text().collect::<String>())
        .context("Failed to parse __NEXT_DATA__ payload")?;

    payload
        .get("buildId")
        .and_then(|v| v.as_str())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .context("buildId not found in __NEXT_DATA__")
}

#[derive(Debug, Default, Deserialize)]
struct SearchPage {
    #[serde(rename = "pageProps", default)]
    page_props: Option<PageProps>,
}

#[derive(Debug, Default, Deserialize)]
struct PageProps {
    #[serde(rename = "searchResults", default)]
    search_results: Option<SearchResults>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResults {
    #[serde(default)]
    results: Option<Vec<SearchEntry>>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(rename = "_type", default)]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    pricing: Option<Pricing>,
}

#[derive(Debug, Deserialize)]
struct Pricing {
    #[serde(default)]
    now: Option<f64>,
    #[serde(default)]
    comparable: Option<String>,
    #[serde(default)]
    unit: Option<PricingUnit>,
}

#[derive(Debug, Deserialize)]
struct PricingUnit {
    #[serde(rename = "isWeighted", default)]
    is_weighted: Option<bool>,
}

/// Picks the first priced product out of a Coles search response.
pub fn parse_search_results(json: &str) -> Result<Option<ProductQuote>> {
    let page: SearchPage =
        serde_json::from_str(json).context("Failed to parse Coles search response")?;

    let entries = page
        .page_props
        .and_then(|p| p.search_results)
        .and_then(|r| r.results)
        .unwrap_or_default();

    for entry in entries {
        if entry.kind.as_deref() != Some("PRODUCT") {
            continue;
        }

        let Some(pricing) = entry.pricing else {
            continue;
        };

        let description = entry.description.unwrap_or_else(|| "<no description>".to_string());
        let unit_label = pricing.comparable.unwrap_or_default();
        let is_weighted = pricing.unit.and_then(|u| u.is_weighted).unwrap_or(false);

        // Packaged goods also carry a per-kg comparable; only loose items are priced by it
        if is_weighted {
            if let Some(per_kg) = per_kg_price(Retailer::Coles, &unit_label) {
                return Ok(Some(ProductQuote {
                    description,
                    unit_price: per_kg,
                    unit_label,
                    is_weighted,
                }));
            }
        }

        let Some(price) = pricing.now else {
            debug!("Skipping unpriced Coles product: {}", description);
            continue;
        };

        return Ok(Some(ProductQuote { description, unit_price: price, unit_label, is_weighted }));
    }

    Ok(None)
}
