use std::time::Duration;

use anyhow::{Context, Result};
use charterfinder::export::save_listings_to_csv;
use charterfinder::fetcher::{HttpFetcher, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use charterfinder::orchestrator::scrape_date_range;
use charterfinder::paginator::{ScrapeOptions, DEFAULT_BASE_URL};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Charterfinder - Boat Availability Scraper for Boataround")]
struct Args {
    /// Destination id as used on the site, e.g. "split-1"
    #[clap(short, long)]
    destination: String,

    /// First check-in date (YYYY-MM-DD)
    #[clap(short, long)]
    start_date: String,

    /// Last check-in date (YYYY-MM-DD), inclusive
    #[clap(short, long)]
    end_date: String,

    /// Path to output CSV file
    #[clap(short, long, default_value = "boats.csv")]
    output: String,

    /// Request timeout in seconds
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Maximum fetch attempts per page
    #[clap(long, default_value_t = DEFAULT_MAX_RETRIES)]
    retries: u32,

    /// Delay between page fetches in milliseconds
    #[clap(long, default_value_t = 500)]
    page_delay: u64,

    /// Base URL of the search service
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Enable debug output
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    charterfinder::debug::set_debug(args.debug);

    println!("Charterfinder - Boat Availability Scraper for Boataround");
    println!("========================================================");

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout), args.retries)
        .context("Failed to build HTTP client")?;
    let options = ScrapeOptions {
        base_url: args.base_url,
        page_delay: Some(Duration::from_millis(args.page_delay)),
    };

    let results = scrape_date_range(
        &fetcher,
        &args.destination,
        &args.start_date,
        &args.end_date,
        &options,
    )?;

    save_listings_to_csv(&results.listings, &args.output)?;

    println!("\n=== Summary ===");
    println!("Listings collected: {}", results.listings.len());
    if results.skipped_listings > 0 {
        println!("Listings skipped (no link): {}", results.skipped_listings);
    }
    if results.is_complete() {
        println!("All date pairs scraped.");
    } else {
        println!("Date pairs skipped: {}", results.skipped.len());
        for skipped in &results.skipped {
            println!("  {}: {}", skipped.pair, skipped.error);
        }
    }
    println!("Saved to: {}", args.output);

    Ok(())
}
