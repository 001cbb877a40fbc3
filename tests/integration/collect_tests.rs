//! Integration tests for the collection pipeline
//!
//! These tests use wiremock to stand in for the catalog site and drive the
//! real HTTP fetcher through full runs.

use async_trait::async_trait;
use market_sampler::config::{
    CatalogConfig, CategoriesConfig, Config, PacingConfig, UserAgentConfig,
};
use market_sampler::crawler::{Coordinator, HttpFetcher, Pacer, Sampler, Sleeper};
use market_sampler::{CatalogRequest, ValidationError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts pauses without waiting
#[derive(Default)]
struct CountingSleeper {
    pauses: AtomicUsize,
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Creates a test configuration pointing at the mock catalog
fn create_test_config(base_url: &str) -> Config {
    Config {
        catalog: CatalogConfig {
            base_url: base_url.to_string(),
            ..CatalogConfig::default()
        },
        pacing: PacingConfig::default(),
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        categories: CategoriesConfig {
            allowed: vec![
                "terrorblade".to_string(),
                "viper".to_string(),
                "wisp".to_string(),
            ],
        },
    }
}

fn create_coordinator(config: &Config, sleeper: Arc<CountingSleeper>) -> Coordinator {
    let fetcher = HttpFetcher::from_config(&config.user_agent).expect("Failed to build client");
    let pacer = Pacer::with_sleeper(Duration::from_millis(config.pacing.delay_ms), sleeper);
    Coordinator::with_parts(config, Arc::new(fetcher), pacer, Sampler::new())
        .expect("Failed to create coordinator")
}

/// A search results page with `count` well-formed listings
fn results_page(count: usize) -> String {
    let listings: String = (0..count)
        .map(|i| {
            format!(
                r#"<a class="market_listing_row_link" href="/market/listings/570/item{i}" id="resultlink_{i}">
  <div class="market_listing_row market_recent_listing_row market_listing_searchresult" id="result_{i}">
    <img id="result_{i}_image" src="https://cdn.example.com/economy/image/{i}/62fx62f" alt="">
    <div class="market_listing_right_cell market_listing_num_listings">
      <span class="market_table_value"><span class="market_listing_num_listings_qty">{qty}</span></span>
    </div>
    <div class="market_listing_right_cell market_listing_their_price">
      <span class="market_table_value normal_price">Starting at:<br>
        <span class="normal_price" data-price="3" data-currency="1">$0.0{i} USD</span>
        <span class="sale_price">$0.01 USD</span>
      </span>
    </div>
    <div class="market_listing_item_name_block">
      <span id="result_{i}_name" class="market_listing_item_name">Blade of the Fallen {i}</span><br>
      <span class="market_listing_game_name">Dota 2</span>
    </div>
  </div>
</a>"#,
                i = i,
                qty = 100 + i
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Steam Community Market :: Search</title></head>
<body><div id="searchResultsRows">{}</div></body></html>"#,
        listings
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_end_to_end_terrorblade_sample() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/market/search"))
        .and(query_param("category_570_Hero[]", "tag_npc_dota_hero_terrorblade"))
        .and(query_param("appid", "570"))
        .respond_with(html_response(results_page(5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let sleeper = Arc::new(CountingSleeper::default());
    let mut coordinator = create_coordinator(&config, sleeper.clone());

    let request = CatalogRequest::new(["terrorblade"]).with_page(1, 3);
    let outcome = coordinator.collect(request).await.expect("Run failed");

    assert_eq!(outcome.listings.len(), 1);
    let records = &outcome.listings["terrorblade"];
    assert_eq!(records.len(), 3);
    for record in records {
        assert!(record.name.starts_with("Blade of the Fallen"));
        assert_eq!(record.category_label, "Dota 2");
        assert!(record.price.ends_with("USD"));
        assert!(!record.price.contains("$0.01"));
        assert!(!record.quantity.is_empty());
        assert!(record.image_url.is_some());
        assert_eq!(record.category, "terrorblade");
    }
    assert_eq!(sleeper.pauses.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_category_sends_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_response(results_page(5)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let mut coordinator = create_coordinator(&config, Arc::new(CountingSleeper::default()));

    let result = coordinator
        .collect(CatalogRequest::new(["terrorblade", "invoker"]))
        .await;

    assert!(matches!(
        result,
        Err(ValidationError::UnknownCategory { ref category, .. }) if category == "invoker"
    ));
    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_server_error_degrades_to_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/market/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let mut coordinator = create_coordinator(&config, Arc::new(CountingSleeper::default()));

    let outcome = coordinator
        .collect(CatalogRequest::new(["viper", "wisp"]))
        .await
        .expect("Run failed");

    assert_eq!(outcome.listings.len(), 2);
    assert!(outcome.listings["viper"].is_empty());
    assert!(outcome.listings["wisp"].is_empty());
    assert_eq!(outcome.statistics.pages_failed, 2);
}

#[tokio::test]
async fn test_failed_page_does_not_stop_later_pages() {
    let mock_server = MockServer::start().await;

    // First request fails, the rest succeed
    Mock::given(method("GET"))
        .and(path("/market/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/market/search"))
        .respond_with(html_response(results_page(10)))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let sleeper = Arc::new(CountingSleeper::default());
    let mut coordinator = create_coordinator(&config, sleeper.clone());

    let request = CatalogRequest::new(["wisp"]).with_page(3, 10);
    let outcome = coordinator.collect(request).await.expect("Run failed");

    let received = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 3);
    assert_eq!(outcome.statistics.pages_attempted, 3);
    assert_eq!(outcome.statistics.pages_failed, 1);
    assert_eq!(outcome.statistics.records_harvested, 20);
    assert_eq!(outcome.listings["wisp"].len(), 10);
    assert_eq!(sleeper.pauses.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_malformed_listings_are_skipped() {
    let mock_server = MockServer::start().await;

    let page = results_page(2).replace(
        "</div></body>",
        r#"<div id="result_77"><span id="result_77_name">Broken</span></div></div></body>"#,
    );

    Mock::given(method("GET"))
        .and(path("/market/search"))
        .respond_with(html_response(page))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let mut coordinator = create_coordinator(&config, Arc::new(CountingSleeper::default()));

    let outcome = coordinator
        .collect(CatalogRequest::new(["viper"]))
        .await
        .expect("Run failed");

    assert_eq!(outcome.listings["viper"].len(), 2);
    assert_eq!(outcome.statistics.listings_skipped, 1);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(wiremock::matchers::header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(html_response(results_page(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let mut coordinator = create_coordinator(&config, Arc::new(CountingSleeper::default()));

    let outcome = coordinator
        .collect(CatalogRequest::new(["wisp"]))
        .await
        .expect("Run failed");

    assert_eq!(outcome.listings["wisp"].len(), 1);
}

#[tokio::test]
async fn test_zero_page_size_sends_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_response(results_page(5)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let mut coordinator = create_coordinator(&config, Arc::new(CountingSleeper::default()));

    let request = CatalogRequest::new(["terrorblade", "viper"]).with_page(1, 0);
    let outcome = coordinator.collect(request).await.expect("Run failed");

    assert_eq!(outcome.listings.len(), 2);
    assert!(outcome.listings.values().all(Vec::is_empty));
    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
