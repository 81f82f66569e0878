use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::BoatListing;

/// Writes the aggregated listings to a CSV file, header first, one row per
/// record. Missing-field sentinels go out exactly as collected.
pub fn save_listings_to_csv(listings: &[BoatListing], output_path: &str) -> Result<()> {
    let file = File::create(Path::new(output_path))
        .context(format!("Failed to create output file: {}", output_path))?;

    let mut writer = csv::Writer::from_writer(file);
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;

    println!("Saved {} listings to {}", listings.len(), output_path);
    Ok(())
}
