use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ScrapeError;

/// Sentinel for a listing field that could not be located on the page.
/// The export stage writes it out as-is so incomplete records stay visible.
pub const MISSING: &str = "N/A";

/// One check-in/check-out combination driving one search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePair {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl fmt::Display for DatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.check_in, self.check_out)
    }
}

/// Destination plus date pair, enough to build every page URL of one search.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub destination: String,
    pub pair: DatePair,
}

impl SearchQuery {
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}/search?destinations={}&checkIn={}&checkOut={}",
            base_url,
            urlencoding::encode(&self.destination),
            self.pair.check_in,
            self.pair.check_out,
        )
    }
}

/// One available boat as listed on a search results page.
///
/// `check_in`/`check_out` come from the listing link when present and fall
/// back to the query's dates, so every record carries the context it was
/// found under even when the page does not repeat it per listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoatListing {
    pub link: String,
    pub boat_name: String,
    pub length: String,
    pub price: String,
    pub check_in: String,
    pub check_out: String,
    pub destination: String,
}

/// Everything collected for one search query across all of its pages.
#[derive(Debug, Default)]
pub struct SearchResults {
    pub listings: Vec<BoatListing>,
    /// Listings dropped because their identifying link was missing.
    pub skipped_listings: usize,
}

/// A date pair whose search run failed and was skipped, with the error
/// that killed it.
#[derive(Debug)]
pub struct SkippedDatePair {
    pub pair: DatePair,
    pub error: ScrapeError,
}

/// Final output of a date-range run: all records in (date, page, document)
/// order plus the date pairs that had to be skipped.
#[derive(Debug, Default)]
pub struct AggregatedResults {
    pub listings: Vec<BoatListing>,
    pub skipped: Vec<SkippedDatePair>,
    pub skipped_listings: usize,
}

impl AggregatedResults {
    /// True when no date pair had to be skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_url_encodes_destination() {
        let query = SearchQuery {
            destination: "kornati islands".to_string(),
            pair: DatePair {
                check_in: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
            },
        };
        assert_eq!(
            query.url("https://example.com"),
            "https://example.com/search?destinations=kornati%20islands&checkIn=2024-05-04&checkOut=2024-05-05"
        );
    }
}
