use crate::dates::date_pairs;
use crate::error::ScrapeError;
use crate::fetcher::PageSource;
use crate::models::{AggregatedResults, SearchQuery, SkippedDatePair};
use crate::paginator::{scrape_search, ScrapeOptions};
use crate::{debug_eprintln, debug_println};

/// Scrapes one destination across an inclusive date range, one one-night
/// window per day, in chronological order.
///
/// A date pair whose search run dies of `FetchExhausted` or `MalformedPage`
/// is recorded as skipped and the range run carries on; one bad day must
/// not block the rest of the range. The returned aggregate always tells
/// records collected apart from date pairs skipped.
pub fn scrape_date_range(
    source: &impl PageSource,
    destination: &str,
    start_date: &str,
    end_date: &str,
    options: &ScrapeOptions,
) -> Result<AggregatedResults, ScrapeError> {
    let pairs = date_pairs(start_date, end_date)?;

    let mut results = AggregatedResults::default();
    for pair in pairs {
        let query = SearchQuery {
            destination: destination.to_string(),
            pair,
        };
        debug_println!("Scraping {} for {}", destination, pair);

        match scrape_search(source, &query, options) {
            Ok(set) => {
                results.listings.extend(set.listings);
                results.skipped_listings += set.skipped_listings;
            }
            Err(error @ (ScrapeError::FetchExhausted { .. } | ScrapeError::MalformedPage { .. })) => {
                debug_eprintln!("Skipping {}: {}", pair, error);
                results.skipped.push(SkippedDatePair { pair, error });
            }
            // Anything else is a bug in this crate, not a bad day.
            Err(error) => return Err(error),
        }
    }
    Ok(results)
}
