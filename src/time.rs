//! Timestamp normalization.
//!
//! Snapshot timestamps arrive in whatever shape the upstream store produced:
//! typed instants, RFC 3339 text, or looser `YYYY-MM-DD HH:MM` strings.
//! Everything funnels through [`parse_timestamp`], which yields a canonical
//! UTC instant or `None`. Unknown is a first-class value; it never surfaces
//! as an error to the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::model::RawTimestamp;

/// Naive formats tried after RFC 3339 and RFC 2822. Values without an
/// explicit zone are taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Normalize a raw timestamp to UTC, or `None` if it cannot be parsed.
pub fn parse_timestamp(raw: &RawTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Instant(dt) => Some(*dt),
        RawTimestamp::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    // Date-only values anchor at midnight UTC.
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn text(s: &str) -> RawTimestamp {
        RawTimestamp::Text(s.to_string())
    }

    #[test]
    fn test_typed_instant_passes_through() {
        let instant = Utc.with_ymd_and_hms(2025, 11, 10, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp(&RawTimestamp::Instant(instant)), Some(instant));
    }

    #[test]
    fn test_rfc3339_with_offset_normalizes_to_utc() {
        let parsed = parse_timestamp(&text("2025-11-10T11:30:00+02:00")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 10, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_naive_text_assumed_utc() {
        let parsed = parse_timestamp(&text("2025-11-10 09:30:00")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 10, 9, 30, 0).unwrap());

        let no_seconds = parse_timestamp(&text("2025-11-10 09:30")).unwrap();
        assert_eq!(no_seconds, parsed);
    }

    #[test]
    fn test_date_only_anchors_at_midnight() {
        let parsed = parse_timestamp(&text("2025-11-10")).unwrap();
        assert_eq!(parsed.hour(), 0);
        assert_eq!(parsed.minute(), 0);
    }

    #[test]
    fn test_garbage_is_unknown_not_error() {
        assert_eq!(parse_timestamp(&text("next tuesday-ish")), None);
        assert_eq!(parse_timestamp(&text("")), None);
        assert_eq!(parse_timestamp(&text("   ")), None);
    }
}
