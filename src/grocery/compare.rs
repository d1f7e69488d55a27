//! Grocery price comparison across both supermarkets.

use super::client::GrocerySearch;
use super::item;
use super::models::{
    ComparisonResult, ComparisonRow, ComparisonSummary, NormalizedQuote, ParsedItem,
};
use super::normalize::normalize;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Compares prices for each item, in order, at both retailers.
///
/// Never fails: session setup problems produce a `failed` result with no
/// rows, and individual search failures leave that quote empty.
pub async fn compare_grocery_prices(
    coles: &impl GrocerySearch,
    woolworths: &impl GrocerySearch,
    items: &[String],
) -> ComparisonResult {
    match try_compare(coles, woolworths, items).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Price comparison failed: {:#}", e);
            ComparisonResult::failed(format!("Error comparing prices: {:#}", e))
        }
    }
}

async fn try_compare(
    coles: &impl GrocerySearch,
    woolworths: &impl GrocerySearch,
    items: &[String],
) -> Result<ComparisonResult> {
    coles.prepare().await.with_context(|| format!("{} session setup failed", coles.retailer()))?;
    woolworths
        .prepare()
        .await
        .with_context(|| format!("{} session setup failed", woolworths.retailer()))?;

    let mut coles_total = 0.0;
    let mut woolworths_total = 0.0;
    let mut rows = Vec::with_capacity(items.len());

    for raw in items {
        let item = item::parse(raw);
        info!("Comparing: {}", item.label());

        let coles_quote = quote_for(coles, &item).await;
        let woolworths_quote = quote_for(woolworths, &item).await;

        if let Some(q) = &coles_quote {
            coles_total += q.price_for_request;
        }
        if let Some(q) = &woolworths_quote {
            woolworths_total += q.price_for_request;
        }

        rows.push(ComparisonRow { item, coles: coles_quote, woolworths: woolworths_quote });
    }

    let summary = ComparisonSummary::from_totals(coles_total, woolworths_total);
    info!(
        "Compared {} items: Coles ${:.2}, Woolworths ${:.2}",
        rows.len(),
        summary.coles_total,
        summary.woolworths_total
    );

    Ok(ComparisonResult::success(rows, summary))
}

/// Searches one retailer and normalizes the match. Failures are logged and
/// yield no quote.
async fn quote_for(client: &impl GrocerySearch, item: &ParsedItem) -> Option<NormalizedQuote> {
    if item.canonical_name.is_empty() {
        return None;
    }

    let retailer = client.retailer();
    match client.search(&item.canonical_name).await {
        Ok(Some(quote)) => {
            Some(normalize(quote, retailer, item.requested_weight, item.requested_unit))
        }
        Ok(None) => {
            info!("No {} match for '{}'", retailer, item.canonical_name);
            None
        }
        Err(e) => {
            warn!("Error searching {} for '{}': {:#}", retailer, item.canonical_name, e);
            None
        }
    }
}
