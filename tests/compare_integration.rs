//! Integration tests for grocery price comparison against mocked supermarket APIs.

use shortcuts_mcp::grocery::{
    compare_grocery_prices, ColesClient, ComparisonResult, Retailer, WoolworthsClient,
};
use shortcuts_mcp::{Config, Status};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLES_LANDING: &str = r#"<!DOCTYPE html><html><head><title>Coles</title></head><body>
    <div id="__next"></div>
    <script id="__NEXT_DATA__" type="application/json">{"props":{"pageProps":{}},"page":"/","buildId":"20250523.2-f00d"}</script>
</body></html>"#;

const COLES_SEARCH_PATH: &str = "/_next/data/20250523.2-f00d/en/search/products.json";
const WOOLWORTHS_SEARCH_PATH: &str = "/apis/ui/Search/products";

const COLES_GARLIC: &str = r#"{"pageProps": {"searchResults": {"results": [
    {"_type": "PRODUCT", "description": "Coles Garlic Loose",
     "pricing": {"now": 1.2, "comparable": "$24.00 per 1kg", "unit": {"isWeighted": true}}}
]}}}"#;

const COLES_MILK: &str = r#"{"pageProps": {"searchResults": {"results": [
    {"_type": "PRODUCT", "description": "Coles Full Cream Milk 2L",
     "pricing": {"now": 3.1, "comparable": "$1.55 per 1L", "unit": {"isWeighted": false}}}
]}}}"#;

const WOOLWORTHS_GARLIC: &str = r#"{"Products": [{"Products": [
    {"Name": "Woolworths Garlic Loose", "Price": 0.9, "CupString": "$11.50 / 1KG",
     "IsWeighted": false, "Unit": "KG"}
]}]}"#;

const WOOLWORTHS_MILK: &str = r#"{"Products": [{"Products": [
    {"Name": "Woolworths Full Cream Milk 2L", "Price": 3.1, "CupString": "$1.55 / 1L",
     "Unit": "Each"}
]}]}"#;

const EMPTY_COLES: &str = r#"{"pageProps": {"searchResults": {"results": []}}}"#;
const EMPTY_WOOLWORTHS: &str = r#"{"Products": null}"#;

async fn coles_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COLES_LANDING))
        .expect(1)
        .mount(&server)
        .await;

    for (term, body) in [("garlic", COLES_GARLIC), ("milk 2L", COLES_MILK), ("saffron", EMPTY_COLES)]
    {
        Mock::given(method("GET"))
            .and(path(COLES_SEARCH_PATH))
            .and(query_param("q", term))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    server
}

async fn woolworths_server() -> MockServer {
    let server = MockServer::start().await;

    for (term, body) in
        [("garlic", WOOLWORTHS_GARLIC), ("milk 2L", WOOLWORTHS_MILK), ("saffron", EMPTY_WOOLWORTHS)]
    {
        Mock::given(method("GET"))
            .and(path(WOOLWORTHS_SEARCH_PATH))
            .and(query_param("searchTerm", term))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    server
}

fn clients(coles_uri: &str, woolworths_uri: &str) -> (ColesClient, WoolworthsClient) {
    let config = Config {
        coles_base_url: coles_uri.to_string(),
        woolworths_base_url: woolworths_uri.to_string(),
        ..Config::default()
    };

    let mut coles = ColesClient::new(&config).unwrap();
    coles.set_delay(0, 0);
    let woolworths = WoolworthsClient::new(&config).unwrap();

    (coles, woolworths)
}

async fn run(items: &[&str]) -> ComparisonResult {
    let coles_mock = coles_server().await;
    let woolworths_mock = woolworths_server().await;
    let (coles, woolworths) = clients(&coles_mock.uri(), &woolworths_mock.uri());

    let items: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    compare_grocery_prices(&coles, &woolworths, &items).await
}

#[tokio::test]
async fn test_weighted_and_packaged_items() {
    let result = run(&["garlic 100g", "milk 2L"]).await;

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.items_compared, 2);

    let garlic = &result.rows[0];
    assert_eq!(garlic.item.canonical_name, "garlic");
    assert_eq!(garlic.coles.as_ref().unwrap().price_for_request, 2.4);
    assert_eq!(garlic.woolworths.as_ref().unwrap().price_for_request, 1.15);

    let milk = &result.rows[1];
    assert_eq!(milk.item.canonical_name, "milk 2L");
    assert_eq!(milk.item.requested_weight, None);
    assert_eq!(milk.coles.as_ref().unwrap().price_for_request, 3.1);
    assert!(milk.woolworths.as_ref().unwrap().calculation_note.is_some());

    assert_eq!(result.summary.coles_total, 5.5);
    assert_eq!(result.summary.woolworths_total, 4.25);
    assert_eq!(result.summary.cheaper_store, Some(Retailer::Woolworths));
    assert_eq!(result.summary.savings, 1.25);
}

#[tokio::test]
async fn test_unmatched_item_has_no_quotes() {
    let result = run(&["saffron"]).await;

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.items_compared, 1);
    assert!(result.rows[0].coles.is_none());
    assert!(result.rows[0].woolworths.is_none());
    assert_eq!(result.summary.coles_total, 0.0);
    assert_eq!(result.summary.cheaper_store, None);
    assert_eq!(result.summary.savings, 0.0);
}

#[tokio::test]
async fn test_unmatched_item_does_not_change_totals() {
    let result = run(&["garlic 100g", "saffron"]).await;

    assert_eq!(result.items_compared, 2);
    assert_eq!(result.summary.coles_total, 2.4);
    assert_eq!(result.summary.woolworths_total, 1.15);
    assert_eq!(result.summary.cheaper_store, Some(Retailer::Woolworths));
    assert_eq!(result.summary.savings, 1.25);
}

#[tokio::test]
async fn test_build_id_failure_fails_whole_comparison() {
    let coles_mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Blocked</body></html>"))
        .mount(&coles_mock)
        .await;

    let woolworths_mock = woolworths_server().await;
    let (coles, woolworths) = clients(&coles_mock.uri(), &woolworths_mock.uri());

    let items = vec!["garlic 100g".to_string()];
    let result = compare_grocery_prices(&coles, &woolworths, &items).await;

    assert_eq!(result.status, Status::Failed);
    assert!(result.rows.is_empty());
    assert_eq!(result.items_compared, 0);

    let message = result.message.unwrap();
    assert!(message.starts_with("Error comparing prices:"));
    assert!(message.contains("__NEXT_DATA__"));
}

#[tokio::test]
async fn test_failed_search_leaves_quote_empty() {
    let coles_mock = coles_server().await;

    let woolworths_mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WOOLWORTHS_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&woolworths_mock)
        .await;

    let (coles, woolworths) = clients(&coles_mock.uri(), &woolworths_mock.uri());
    let items = vec!["garlic 100g".to_string()];
    let result = compare_grocery_prices(&coles, &woolworths, &items).await;

    assert_eq!(result.status, Status::Success);
    assert!(result.rows[0].coles.is_some());
    assert!(result.rows[0].woolworths.is_none());
    assert_eq!(result.summary.woolworths_total, 0.0);
    assert_eq!(result.summary.cheaper_store, None);
}
