//! Timestamp handling for diary events.
//!
//! Event timestamps are carried as the strings the upstream diary supplied and
//! are only parsed where they are consumed: for ordering, for focus selection
//! and for the human-readable time label. This module holds those parsers and
//! formatters.
//!
//! Accepted timestamp shapes:
//! - RFC 3339 with an offset (`2024-02-12T09:30:00Z`, `2024-02-12T09:30:00+01:00`)
//! - Offset-less local datetimes (`2024-02-12T09:30`, `2024-02-12 09:30:00.000`),
//!   which are interpreted as UTC for ordering purposes

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Separator used between the start and end of a time range label.
pub const TIME_RANGE_SEPARATOR: &str = " – ";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a diary timestamp, keeping the offset it was written with.
///
/// Returns `None` for anything that is not a date-time (including bare dates).
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Parses a timestamp into the UTC instant used for ordering.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value).map(|dt| dt.with_timezone(&Utc))
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses an `HH:MM` or `HH:MM:SS` wall-clock time.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Formats a calendar date as a day key (`YYYY-MM-DD`).
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Derives a day key from the date portion of a start timestamp.
///
/// The first ten characters must form a valid calendar date.
pub fn day_key_from_start(start: &str) -> Option<String> {
    let prefix = start.trim().get(..10)?;
    parse_date(prefix).map(day_key)
}

/// Formats the short day label used on day buckets, e.g. `Mon 12 Feb`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %d %b").to_string()
}

/// Builds the time label for an event.
///
/// - both ends parse: `"09:30 – 10:00"`
/// - only the start parses: `"09:30"`
/// - the start does not parse: `None`
pub fn time_label(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = parse_timestamp(start?)?;
    let start_label = start.format("%H:%M").to_string();

    match end.and_then(parse_timestamp) {
        Some(end) => Some(format!(
            "{}{}{}",
            start_label,
            TIME_RANGE_SEPARATOR,
            end.format("%H:%M")
        )),
        None => Some(start_label),
    }
}

/// Orders two optional instants ascending, with missing instants last.
pub fn compare_instants(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
