//! Timestamp parsing and formatting.
//!
//! Access-log sheets accumulate timestamps in whatever format the writing
//! client used: ISO-8601 strings, Unix epochs (seconds or milliseconds),
//! or the canonical human-readable pattern this service writes. This module
//! parses all of them and formats the single canonical pattern.

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

/// The canonical pattern written to the access log:
/// `Weekday, Mon DD, YYYY hh:mm AM/PM` (e.g. `Friday, Aug 29, 2025 03:41 PM`).
pub const CANONICAL_FORMAT: &str = "%A, %b %d, %Y %I:%M %p";

/// Fallback patterns tried for values that are neither epochs, ISO-8601,
/// nor already canonical.
const EXTRA_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("empty timestamp value")]
    Empty,

    #[error("unrecognized timestamp format: {0}")]
    Unrecognized(String),

    #[error("epoch value out of range: {0}")]
    EpochOutOfRange(String),
}

/// Formats a timestamp in the canonical pattern.
pub fn format_canonical(ts: NaiveDateTime) -> String {
    ts.format(CANONICAL_FORMAT).to_string()
}

/// Returns true if the value already uses the canonical pattern.
pub fn is_canonical(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value.trim(), CANONICAL_FORMAT).is_ok()
}

/// Parses a timestamp cell of unknown provenance.
///
/// Recognized inputs, in order:
/// 1. Unix epoch as a digit string; 12+ digits are taken as milliseconds,
///    fewer as seconds (the only way to tell them apart is length).
/// 2. ISO-8601 / RFC 3339.
/// 3. The canonical pattern.
/// 4. A handful of common date-time patterns.
///
/// All results are naive (no timezone); ISO inputs are converted to UTC
/// before the offset is dropped.
pub fn parse_flexible(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    if value.chars().all(|c| c.is_ascii_digit()) {
        let n: i64 = value
            .parse()
            .map_err(|_| TimestampError::EpochOutOfRange(value.to_string()))?;
        let parsed = if value.len() >= 12 {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };
        return parsed
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| TimestampError::EpochOutOfRange(value.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    if let Ok(ts) = NaiveDateTime::parse_from_str(value, CANONICAL_FORMAT) {
        return Ok(ts);
    }

    for format in EXTRA_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }

    Err(TimestampError::Unrecognized(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 29)
            .unwrap()
            .and_hms_opt(15, 41, 0)
            .unwrap()
    }

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_canonical(sample()), "Friday, Aug 29, 2025 03:41 PM");
    }

    #[test]
    fn test_canonical_round_trip() {
        let formatted = format_canonical(sample());
        assert!(is_canonical(&formatted));
        assert_eq!(parse_flexible(&formatted).unwrap(), sample());
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_flexible("2025-08-29T15:41:00Z").unwrap();
        assert_eq!(ts, sample());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_flexible("2025-08-29T17:41:00+02:00").unwrap();
        assert_eq!(ts, sample());
    }

    #[test]
    fn test_parse_epoch_seconds() {
        // 2025-08-29T15:41:00Z
        let ts = parse_flexible("1756482060").unwrap();
        assert_eq!(ts, sample());
    }

    #[test]
    fn test_parse_epoch_millis() {
        let ts = parse_flexible("1756482060000").unwrap();
        assert_eq!(ts, sample());
    }

    #[test]
    fn test_epoch_length_disambiguation() {
        // 10 digits is seconds, 13 digits is milliseconds; both name the
        // same instant here.
        let secs = parse_flexible("1756482060").unwrap();
        let millis = parse_flexible("1756482060000").unwrap();
        assert_eq!(secs, millis);
    }

    #[test]
    fn test_parse_common_patterns() {
        let ts = parse_flexible("2025-08-29 15:41:00").unwrap();
        assert_eq!(ts, sample());
        let ts = parse_flexible("08/29/2025 15:41").unwrap();
        assert_eq!(ts, sample());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let ts = parse_flexible("  2025-08-29T15:41:00Z  ").unwrap();
        assert_eq!(ts, sample());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_flexible(""), Err(TimestampError::Empty));
        assert_eq!(parse_flexible("   "), Err(TimestampError::Empty));
    }

    #[test]
    fn test_parse_unrecognized() {
        assert!(matches!(
            parse_flexible("next tuesday"),
            Err(TimestampError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_is_canonical_rejects_other_formats() {
        assert!(!is_canonical("2025-08-29T15:41:00Z"));
        assert!(!is_canonical("1756482060"));
    }

    #[test]
    fn test_canonical_format_uses_minutes_only() {
        let ts = NaiveDate::from_ymd_opt(2025, 8, 29)
            .unwrap()
            .and_hms_opt(15, 41, 37)
            .unwrap();
        let reparsed = parse_flexible(&format_canonical(ts)).unwrap();
        assert_eq!(reparsed.second(), 0);
        assert_eq!(reparsed.minute(), 41);
    }
}
