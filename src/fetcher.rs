use std::time::Duration;

use reqwest::blocking::Client;
pub use reqwest::StatusCode;

use crate::debug_println;
use crate::error::ScrapeError;

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Raw markup of one fetched results page plus the status it arrived with.
///
/// The fetcher does not interpret the body; deciding what a non-success
/// status means is the caller's job.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: String,
}

/// Where search result pages come from. The paginator and the orchestrator
/// only talk to this trait, so tests can feed them canned pages.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;
}

/// HTTP page source with a bounded retry on transport failures.
///
/// Only network-level failures (connect errors, timeouts) are retried; a
/// response that arrives with an error status is handed back unchanged.
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, max_retries: u32) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            max_retries,
        })
    }

    fn get_once(&self, url: &str) -> Result<FetchedPage, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        Ok(FetchedPage { status, body })
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let url = url.trim();
        with_retries(self.max_retries, |attempt| {
            if attempt > 1 {
                debug_println!("Retrying {} (attempt {}/{})", url, attempt, self.max_retries);
            }
            self.get_once(url)
        })
        .map_err(|(attempts, source)| ScrapeError::FetchExhausted {
            url: url.to_string(),
            attempts,
            source: Box::new(source),
        })
    }
}

/// Runs `op` up to `max` times, handing it the 1-based attempt number.
/// Every `Err` counts as transient; after the final attempt the last error
/// is returned together with the number of attempts actually made.
pub(crate) fn with_retries<T, E>(
    max: u32,
    mut op: impl FnMut(u32) -> Result<T, E>,
) -> Result<T, (u32, E)> {
    let attempts = max.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => return Err((attempts, e)),
            Err(_) => attempt += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeds_without_retrying() {
        let mut calls = 0;
        let result: Result<u32, (u32, &str)> = with_retries(5, |_| {
            calls += 1;
            Ok(42)
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn retries_until_success() {
        let mut calls = 0;
        let result: Result<&str, (u32, &str)> = with_retries(5, |attempt| {
            calls += 1;
            if attempt < 3 {
                Err("connection reset")
            } else {
                Ok("page")
            }
        });
        assert_eq!(result.unwrap(), "page");
        assert_eq!(calls, 3);
    }

    #[test]
    fn exhausts_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), (u32, &str)> = with_retries(5, |_| {
            calls += 1;
            Err("timed out")
        });
        let (attempts, last) = result.unwrap_err();
        assert_eq!(calls, 5);
        assert_eq!(attempts, 5);
        assert_eq!(last, "timed out");
    }

    #[test]
    fn error_status_is_not_a_transport_failure() {
        // An error status arrives as Ok(FetchedPage), so the retry loop
        // must see exactly one attempt.
        let mut calls = 0;
        let result: Result<StatusCode, (u32, &str)> = with_retries(5, |_| {
            calls += 1;
            Ok(StatusCode::INTERNAL_SERVER_ERROR)
        });
        assert_eq!(result.unwrap(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(calls, 1);
    }

    #[test]
    fn zero_max_still_makes_one_attempt() {
        let mut calls = 0;
        let _: Result<(), (u32, &str)> = with_retries(0, |_| {
            calls += 1;
            Err("nope")
        });
        assert_eq!(calls, 1);
    }
}
