use chrono::{Duration, NaiveDate};

use crate::error::ScrapeError;
use crate::models::DatePair;

/// Expands an inclusive `YYYY-MM-DD` range into one-night check-in/check-out
/// pairs, one per calendar day. `start == end` yields a single pair; a start
/// after the end is an `InvalidDateRange` before any network work happens.
pub fn date_pairs(start: &str, end: &str) -> Result<Vec<DatePair>, ScrapeError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(ScrapeError::InvalidDateRange(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }

    let mut pairs = Vec::new();
    let mut check_in = start;
    while check_in <= end {
        pairs.push(DatePair {
            check_in,
            check_out: check_in + Duration::days(1),
        });
        check_in += Duration::days(1);
    }
    Ok(pairs)
}

fn parse_date(value: &str) -> Result<NaiveDate, ScrapeError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ScrapeError::InvalidDateRange(format!("{:?} is not a YYYY-MM-DD date: {}", value, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_range_yields_one_pair() {
        let pairs = date_pairs("2024-05-04", "2024-05-04").unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].check_in.to_string(), "2024-05-04");
        assert_eq!(pairs[0].check_out.to_string(), "2024-05-05");
    }

    #[test]
    fn range_is_inclusive_and_chronological() {
        let pairs = date_pairs("2024-05-04", "2024-05-07").unwrap();
        let check_ins: Vec<_> = pairs.iter().map(|p| p.check_in.to_string()).collect();
        assert_eq!(
            check_ins,
            ["2024-05-04", "2024-05-05", "2024-05-06", "2024-05-07"]
        );
        for pair in &pairs {
            assert_eq!(pair.check_out, pair.check_in + Duration::days(1));
        }
    }

    #[test]
    fn pairs_cross_month_boundaries() {
        let pairs = date_pairs("2024-05-31", "2024-06-01").unwrap();
        assert_eq!(pairs[0].check_out.to_string(), "2024-06-01");
        assert_eq!(pairs[1].check_out.to_string(), "2024-06-02");
    }

    #[test]
    fn start_after_end_is_invalid() {
        let err = date_pairs("2024-05-05", "2024-05-04").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidDateRange(_)));
    }

    #[test]
    fn unparsable_date_is_invalid() {
        let err = date_pairs("04.05.2024", "2024-05-05").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidDateRange(_)));
    }
}
