use std::thread;
use std::time::Duration;

use scraper::Html;

use crate::debug_println;
use crate::error::ScrapeError;
use crate::extractor::{extract_listings, QueryContext};
use crate::fetcher::{FetchedPage, PageSource};
use crate::models::{SearchQuery, SearchResults};
use crate::page::{is_last_page, BoataroundLayout};

pub const DEFAULT_BASE_URL: &str = "https://bt2stag.boataround.com";

/// Knobs for one scraping run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub base_url: String,
    /// Pause between page fetches, to be gentle with the server.
    pub page_delay: Option<Duration>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_delay: Some(Duration::from_millis(500)),
        }
    }
}

/// Collects every page of one destination/date-pair search.
pub fn scrape_search(
    source: &impl PageSource,
    query: &SearchQuery,
    options: &ScrapeOptions,
) -> Result<SearchResults, ScrapeError> {
    let url = query.url(&options.base_url);
    scrape_pages(source, &url, &QueryContext::from_query(query), options)
}

/// Lower-level entry point: collects every page behind one search URL.
/// Destination and date context for the records is recovered from the URL's
/// query string.
pub fn scrape_search_url(
    source: &impl PageSource,
    url: &str,
    options: &ScrapeOptions,
) -> Result<SearchResults, ScrapeError> {
    scrape_pages(source, url, &QueryContext::from_url(url), options)
}

/// Walks pages 1, 2, ... strictly in order, one fetch in flight at a time,
/// until a page classifies as last. Last-page detection only means anything
/// relative to sequential requests, so there is no speculative fetching.
/// Any fetch or classification failure discards the partial result set and
/// propagates with the failing URL attached.
fn scrape_pages(
    source: &impl PageSource,
    search_url: &str,
    ctx: &QueryContext,
    options: &ScrapeOptions,
) -> Result<SearchResults, ScrapeError> {
    let layout = BoataroundLayout::default();
    let mut results = SearchResults::default();
    let mut page_number: u32 = 1;

    loop {
        let page_url = format!("{}&page={}", search_url, page_number);
        let page = fetch_page(source, &page_url)?;
        let doc = Html::parse_document(&page.body);

        let last = is_last_page(&layout, &doc, &page_url)?;
        let extracted = extract_listings(&layout, &doc, &page_url, ctx)?;
        debug_println!(
            "Page {}: {} listings, last page: {}",
            page_number,
            extracted.listings.len(),
            last
        );
        results.listings.extend(extracted.listings);
        results.skipped_listings += extracted.skipped;

        if last {
            return Ok(results);
        }
        page_number += 1;
        if let Some(delay) = options.page_delay {
            thread::sleep(delay);
        }
    }
}

/// A response that arrives with an error status is not retried; its body
/// cannot be trusted to be a results page, so it surfaces as malformed.
fn fetch_page(source: &impl PageSource, url: &str) -> Result<FetchedPage, ScrapeError> {
    let page = source.fetch(url)?;
    if !page.status.is_success() {
        return Err(ScrapeError::MalformedPage {
            url: url.to_string(),
            reason: format!("HTTP {}", page.status),
        });
    }
    Ok(page)
}
