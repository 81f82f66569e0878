use thiserror::Error;

/// Failure kinds of the scraping pipeline.
///
/// `FetchExhausted` and `MalformedPage` are fatal to a single search run;
/// the date-range orchestrator catches them and records the affected date
/// pair as skipped. `InvalidDateRange` is fatal to the whole run and is
/// raised before any network activity.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("giving up on {url} after {attempts} attempts: {source}")]
    FetchExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unrecognized page structure at {url}: {reason}")]
    MalformedPage { url: String, reason: String },

    #[error("invalid date range: {0}")]
    InvalidDateRange(String),
}
