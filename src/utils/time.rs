// src/utils/time.rs

//! Timestamp parsing and formatting in the reference timezone.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Format used for the run timestamp column.
pub const RUN_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format the job start time in the reference timezone.
pub fn run_timestamp(now: DateTime<Utc>, tz: FixedOffset) -> String {
    now.with_timezone(&tz).format(RUN_DATE_FORMAT).to_string()
}

/// Parse an ISO-8601 timestamp as returned by the API.
///
/// Accepts RFC 3339 (`Z` or numeric offset) and offsets without a colon
/// (`+0000`). Timestamps without an offset are taken as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Split a timestamp into `(YYYY-MM-DD, HH:MM:SS)` in the given timezone.
pub fn split_date_time(raw: &str, tz: FixedOffset) -> Option<(String, String)> {
    let local = parse_instant(raw)?.with_timezone(&tz);
    Some((
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M:%S").to_string(),
    ))
}
