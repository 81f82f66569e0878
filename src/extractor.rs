use scraper::Html;

use crate::error::ScrapeError;
use crate::{debug_eprintln, debug_println};
use crate::models::{BoatListing, SearchQuery, MISSING};
use crate::page::{Field, PageLayout};

/// The destination and dates a query ran under, stamped onto every record
/// extracted for it.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
}

impl QueryContext {
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            destination: query.destination.clone(),
            check_in: query.pair.check_in.to_string(),
            check_out: query.pair.check_out.to_string(),
        }
    }

    /// Recovers the context from a raw search URL; anything the URL does
    /// not carry stays at the missing sentinel.
    pub fn from_url(url: &str) -> Self {
        let param = |name| query_param(url, name).unwrap_or_else(|| MISSING.to_string());
        Self {
            destination: param("destinations"),
            check_in: param("checkIn"),
            check_out: param("checkOut"),
        }
    }
}

/// Listings found on one page plus the count of nodes dropped for lacking
/// their identifying link.
#[derive(Debug, Default)]
pub struct ExtractedPage {
    pub listings: Vec<BoatListing>,
    pub skipped: usize,
}

/// Pulls all listing records out of one parsed results page, in document
/// order. Fields that cannot be located become the missing sentinel; a
/// node without a link is counted and dropped, not fatal.
pub fn extract_listings(
    layout: &impl PageLayout,
    doc: &Html,
    url: &str,
    ctx: &QueryContext,
) -> Result<ExtractedPage, ScrapeError> {
    let root = layout.search_root(doc).ok_or_else(|| ScrapeError::MalformedPage {
        url: url.to_string(),
        reason: "search container not found".to_string(),
    })?;

    let mut extracted = ExtractedPage::default();
    for node in layout.listing_nodes(root) {
        let Some(link) = layout.field(node, Field::Link) else {
            debug_eprintln!("Listing without link on {}, skipping", url);
            extracted.skipped += 1;
            continue;
        };

        let or_missing = |value: Option<String>| value.unwrap_or_else(|| MISSING.to_string());
        extracted.listings.push(BoatListing {
            boat_name: or_missing(layout.field(node, Field::BoatName)),
            length: or_missing(layout.field(node, Field::Length)),
            price: or_missing(layout.field(node, Field::Price)),
            check_in: query_param(&link, "checkIn").unwrap_or_else(|| ctx.check_in.clone()),
            check_out: query_param(&link, "checkOut").unwrap_or_else(|| ctx.check_out.clone()),
            destination: ctx.destination.clone(),
            link,
        });
    }
    debug_println!(
        "Extracted {} listings from {} ({} skipped)",
        extracted.listings.len(),
        url,
        extracted.skipped
    );
    Ok(extracted)
}

/// Value of one query-string parameter, percent-decoded. Empty values count
/// as absent.
pub(crate) fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != name || value.is_empty() {
            return None;
        }
        Some(
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        )
    })
}
