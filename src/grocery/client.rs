//! Search trait and browser request setup for the supermarket clients.

use super::models::{ProductQuote, Retailer};
use anyhow::Result;
use async_trait::async_trait;
use wreq::{Client, RequestBuilder};
use wreq_util::Emulation;

/// Trait for supermarket product search - enables mocking for tests.
#[async_trait]
pub trait GrocerySearch: Send + Sync {
    /// Returns which retailer this client searches.
    fn retailer(&self) -> Retailer;

    /// Acquires whatever session state searching needs.
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// Returns the best-matching product for a search term, if any.
    async fn search(&self, term: &str) -> Result<Option<ProductQuote>>;
}

/// GET with Chrome emulation and browser headers; both stores reject bare clients.
pub(crate) fn browser_get(client: &Client, url: &str, accept: &str) -> RequestBuilder {
    client
        .get(url)
        .emulation(Emulation::Chrome131)
        .header("Accept", accept)
        .header("Accept-Language", "en-AU,en;q=0.9")
        .header("Cache-Control", "no-cache")
        .header("Pragma", "no-cache")
        .header("Sec-Ch-Ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"")
        .header("Sec-Ch-Ua-Mobile", "?0")
        .header("Sec-Ch-Ua-Platform", "\"macOS\"")
}
