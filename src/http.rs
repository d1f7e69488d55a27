//! HTTP client construction shared by the scraping and LLM clients.

use crate::config::Config;
use anyhow::{Context, Result};
use std::fmt::Display;
use std::time::Duration;
use tracing::debug;
use wreq::{Client, RequestBuilder};

/// Builds an HTTP client with cookies, compression and optional proxy.
pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10));

    if let Some(proxy_url) = &config.proxy {
        debug!("Configuring proxy: {}", proxy_url);
        let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Sends a request and returns the body of a successful response.
pub async fn fetch_text(request: RequestBuilder, upstream: impl Display) -> Result<String> {
    let response = request.send().await.context("Failed to send request")?;

    let status = response.status();
    debug!("{} response status: {}", upstream, status);

    if !status.is_success() {
        anyhow::bail!("{} returned status: {}", upstream, status);
    }

    response.text().await.context("Failed to read response body")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_text_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let client = build_client(&Config::default()).unwrap();
        let url = format!("{}/ok", mock_server.uri());
        let body = fetch_text(client.get(&url), "Test").await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_text_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/blocked"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = build_client(&Config::default()).unwrap();
        let url = format!("{}/blocked", mock_server.uri());
        let err = fetch_text(client.get(&url), "Test").await.unwrap_err();
        assert!(err.to_string().contains("Test returned status"));
        assert!(err.to_string().contains("403"));
    }
}
