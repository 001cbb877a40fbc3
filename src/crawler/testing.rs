//! Test doubles shared by the crawler unit tests

use crate::crawler::fetcher::CatalogFetcher;
use crate::crawler::pacer::Sleeper;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Markup for one well-formed listing, wrapped the way the catalog wraps it
pub fn listing_html(index: usize, name: &str) -> String {
    format!(
        r#"<a class="market_listing_row_link" href="https://market.example.com/listings/570/{index}" id="resultlink_{index}">
    <div class="market_listing_row market_recent_listing_row market_listing_searchresult" id="result_{index}">
        <img id="result_{index}_image" src="https://cdn.example.com/items/{index}.png" alt="">
        <div class="market_listing_price_listings_block">
            <div class="market_listing_right_cell market_listing_num_listings">
                <span class="market_table_value">
                    <span class="market_listing_num_listings_qty">42</span>
                </span>
            </div>
            <div class="market_listing_right_cell market_listing_their_price">
                <span class="market_table_value normal_price">
                    Starting at:<br>
                    <span class="normal_price" data-price="10" data-currency="1">$0.10 USD</span>
                    <span class="sale_price">$0.09 USD</span>
                </span>
            </div>
        </div>
        <div class="market_listing_item_name_block">
            <span id="result_{index}_name" class="market_listing_item_name">{name}</span>
            <br>
            <span class="market_listing_game_name">Dota 2</span>
        </div>
    </div>
</a>"#,
        index = index,
        name = name
    )
}

/// Wraps listings in a search results page
pub fn results_page(listings: &[String]) -> String {
    format!(
        r#"<html><head><title>Market</title></head><body>
<div id="searchResultsRows">
{}
</div>
</body></html>"#,
        listings.join("\n")
    )
}

/// A page of `count` well-formed listings
pub fn page_of(count: usize, prefix: &str) -> String {
    let listings: Vec<String> = (0..count)
        .map(|i| listing_html(i, &format!("{} {}", prefix, i)))
        .collect();
    results_page(&listings)
}

/// Scripted fetcher that records every URL it is asked for
///
/// Responses are keyed by request number (1-based, across all categories).
/// Unscripted requests return `default_body`.
#[derive(Clone, Default)]
pub struct FakeFetcher {
    responses: Arc<Mutex<HashMap<usize, Result<String, u16>>>>,
    default_body: String,
    calls: Arc<Mutex<Vec<Url>>>,
}

impl FakeFetcher {
    pub fn serving(body: impl Into<String>) -> Self {
        Self {
            default_body: body.into(),
            ..Self::default()
        }
    }

    /// Makes request number `call` fail with `status`
    pub fn fail_call(self, call: usize, status: u16) -> Self {
        self.responses.lock().unwrap().insert(call, Err(status));
        self
    }

    /// Makes request number `call` return `body`
    pub fn respond_call(self, call: usize, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(call, Ok(body.into()));
        self
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogFetcher for FakeFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(url.clone());
            calls.len()
        };

        let scripted = self.responses.lock().unwrap().get(&call).cloned();
        match scripted {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            None => Ok(self.default_body.clone()),
        }
    }
}

/// Sleeper that records requested pauses instead of waiting
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}
