//! Listing extractor for catalog search pages
//!
//! This module turns one page of catalog search markup into listing records:
//! - Locates result containers in document order
//! - Extracts the name, image, game label, price and listing count of each
//! - Drops containers with missing fields, reporting them as gaps

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::fmt;

/// Result containers: ids containing `result_` but not the anchor wrappers
const CONTAINER_SELECTOR: &str = r#"div[id*="result_"]:not([id*="resultlink_"])"#;
const GAME_LABEL_SELECTOR: &str = r#"span[class*="market_listing_game_name"]"#;
/// Only the regular price; sale prices live in sibling spans
const PRICE_SELECTOR: &str =
    r#"span[class*="market_table_value"] > span[class*="normal_price"]"#;
const QUANTITY_SELECTOR: &str = r#"span[class*="market_listing_num_listings"]"#;

/// One catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Display name of the item
    pub name: String,

    /// Item image, when the image element carries a `src`
    pub image_url: Option<String>,

    /// Group label rendered with the listing (the game name)
    pub category_label: String,

    /// Price as displayed, including currency formatting
    pub price: String,

    /// Number of listings as displayed
    pub quantity: String,

    /// The requested category this record was collected for
    pub category: String,
}

/// Fields a listing container must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Name,
    Image,
    GameLabel,
    Price,
    Quantity,
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Image => "image",
            Self::GameLabel => "game label",
            Self::Price => "price",
            Self::Quantity => "quantity",
        };
        write!(f, "{}", name)
    }
}

/// A result container that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionGap {
    /// The container's element id
    pub container_id: String,

    /// Fields that could not be located
    pub missing: Vec<ListingField>,
}

impl fmt::Display for ExtractionGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<String> = self.missing.iter().map(ToString::to_string).collect();
        write!(
            f,
            "container '{}' is missing: {}",
            self.container_id,
            missing.join(", ")
        )
    }
}

/// Everything extracted from one page
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Successfully extracted records, in document order
    pub records: Vec<Record>,

    /// Containers that were skipped
    pub gaps: Vec<ExtractionGap>,

    /// Number of containers examined
    pub containers: usize,
}

impl Extraction {
    /// True when the page had no result containers at all
    pub fn is_empty(&self) -> bool {
        self.containers == 0
    }
}

/// Extracts up to `max_items` listings from a catalog search page
///
/// Only the first `max_items` result containers are examined; a container
/// missing any required field is skipped and reported in
/// [`Extraction::gaps`]. A page without result containers yields an empty
/// extraction, which means the catalog has no more listings.
///
/// # Arguments
///
/// * `html` - The page markup
/// * `category` - The requested category, attached to every record
/// * `max_items` - Maximum number of containers to examine
///
/// # Example
///
/// ```
/// use market_sampler::crawler::extract_listings;
///
/// let html = r#"<div id="result_0">
///     <img id="result_0_image" src="https://cdn.example.com/0.png">
///     <span id="result_0_name">Sword</span>
///     <span class="market_listing_game_name">Dota 2</span>
///     <span class="market_table_value"><span class="normal_price">$1.00</span></span>
///     <span class="market_listing_num_listings">12</span>
/// </div>"#;
///
/// let extraction = extract_listings(html, "terrorblade", 10);
/// assert_eq!(extraction.records[0].name, "Sword");
/// assert_eq!(extraction.records[0].category, "terrorblade");
/// ```
pub fn extract_listings(html: &str, category: &str, max_items: usize) -> Extraction {
    let document = Html::parse_document(html);
    let mut extraction = Extraction::default();

    let Ok(container_selector) = Selector::parse(CONTAINER_SELECTOR) else {
        return extraction;
    };

    for container in document.select(&container_selector).take(max_items) {
        extraction.containers += 1;

        match extract_record(container, category) {
            Ok(record) => {
                tracing::debug!(
                    "Extracted listing '{}' ({}, {} listed)",
                    record.name,
                    record.price,
                    record.quantity
                );
                extraction.records.push(record);
            }
            Err(gap) => {
                tracing::warn!("Skipping listing for {}: {}", category, gap);
                extraction.gaps.push(gap);
            }
        }
    }

    if extraction.is_empty() {
        tracing::info!("No listings found on page for {}", category);
    }

    extraction
}

/// Extracts a single record from a result container
fn extract_record(container: ElementRef<'_>, category: &str) -> Result<Record, ExtractionGap> {
    let container_id = container.value().id().unwrap_or_default().to_string();

    // result_7 -> 7
    let key = container_id.split('_').nth(1).unwrap_or_default();

    let name = find_first(container, &format!(r#"span[id="result_{}_name"]"#, key));
    let image = find_first(container, &format!(r#"[id="result_{}_image"]"#, key));
    let game_label = find_first(container, GAME_LABEL_SELECTOR);
    let price = find_first(container, PRICE_SELECTOR);
    let quantity = find_first(container, QUANTITY_SELECTOR);

    match (name, image, game_label, price, quantity) {
        (Some(name), Some(image), Some(game_label), Some(price), Some(quantity)) => Ok(Record {
            name: element_text(name),
            image_url: image.value().attr("src").map(str::to_string),
            category_label: element_text(game_label),
            price: element_text(price),
            quantity: element_text(quantity),
            category: category.to_string(),
        }),
        (name, image, game_label, price, quantity) => {
            let missing = [
                (ListingField::Name, name.is_none()),
                (ListingField::Image, image.is_none()),
                (ListingField::GameLabel, game_label.is_none()),
                (ListingField::Price, price.is_none()),
                (ListingField::Quantity, quantity.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();

            Err(ExtractionGap {
                container_id,
                missing,
            })
        }
    }
}

/// Finds the first descendant of `container` matching `css`
///
/// An unparsable selector (e.g. from a container id with quotes in it) is
/// treated as no match.
fn find_first<'a>(container: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    container.select(&selector).next()
}

/// Concatenated, trimmed text content of an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
