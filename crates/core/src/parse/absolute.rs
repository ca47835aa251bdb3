//! Absolute date inputs: unix epochs and ISO 8601 / RFC 3339 strings.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::trace;

use super::ParsedDate;

/// Epochs accepted as seconds: 9 to 11 digits (1973 to 5138).
const EPOCH_SECONDS_DIGITS: std::ops::RangeInclusive<usize> = 9..=11;
/// Epochs accepted as milliseconds: 12 to 14 digits.
const EPOCH_MILLIS_DIGITS: std::ops::RangeInclusive<usize> = 12..=14;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a bare unix timestamp in seconds or milliseconds.
pub(super) fn parse_epoch(input: &str) -> Option<ParsedDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value: i64 = trimmed.parse().ok()?;
    let (utc, unit) = if EPOCH_SECONDS_DIGITS.contains(&trimmed.len()) {
        (Utc.timestamp_opt(value, 0).single()?, "seconds")
    } else if EPOCH_MILLIS_DIGITS.contains(&trimmed.len()) {
        (Utc.timestamp_millis_opt(value).single()?, "milliseconds")
    } else {
        trace!(digits = trimmed.len(), "not an epoch length");
        return None;
    };

    Some(ParsedDate::new(
        utc.with_timezone(&Local),
        format!("Unix epoch ({})", unit),
    ))
}

/// Parse RFC 3339 and the common ISO 8601 shapes.
///
/// Strings without an offset are read as local time.
pub(super) fn parse_iso(input: &str) -> Option<ParsedDate> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ParsedDate::new(dt.with_timezone(&Local), "RFC 3339"));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            let local = Local.from_local_datetime(&naive).earliest()?;
            return Some(ParsedDate::new(local, "ISO 8601 (local time)"));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let local = Local
            .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
            .earliest()?;
        return Some(ParsedDate::new(local, "ISO 8601 date"));
    }

    None
}
