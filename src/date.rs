//! Date helpers for calendar queries

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate};

/// Length of the calendar window fetched per run
pub const WINDOW_DAYS: i64 = 7;

/// Epoch millis of `YYYY-MM-DD` at 00:00 UTC
pub fn date_to_timestamp_ms(date: &str) -> Result<i64> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| Error::invalid_argument(format!("Invalid date '{date}': {e}")))?;
    let midnight = parsed
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::invalid_argument(format!("Invalid date '{date}'")))?;
    Ok(midnight.and_utc().timestamp_millis())
}

/// Start and end (epoch millis) of the seven days starting at `date`
pub fn next_seven_days(date: &str) -> Result<(i64, i64)> {
    let start = date_to_timestamp_ms(date)?;
    Ok((start, start + Duration::days(WINDOW_DAYS).num_milliseconds()))
}
