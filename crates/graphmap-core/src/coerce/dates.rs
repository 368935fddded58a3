//! Date and time conversions
//!
//! Parsing tries each known convention in order and never shares mutable
//! state, so it is safe to call from any number of threads at once.

use super::{FromGraph, TargetKind, ToGraph};
use crate::error::MappingResult;
use crate::mapper::{MappingContext, SerializeContext};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use graphmap_domain::DateConvention;
use serde_json::Value;

const LONG_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse a timestamp in any of the long conventions
///
/// Tries Unix seconds, then `2011-03-25T17:38:40+0000`, then the same without
/// an offset (taken as UTC), then RFC 3339. Returns `None` when nothing fits.
pub fn parse_long_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DateConvention::LONG_FALLBACKS
        .iter()
        .find_map(|convention| parse_with(*convention, text))
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc))
        })
}

/// Parse a calendar date in any of the short conventions
///
/// Tries `2011-03-25`, `03/25/2011` and `2011-03` (first of the month).
pub fn parse_short_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DateConvention::SHORT_FALLBACKS
        .iter()
        .find_map(|convention| parse_calendar(*convention, text))
}

/// Render a timestamp in the long convention
///
/// Fractional seconds are written only when present, so whole-second values
/// keep the API's own `2011-03-25T17:38:40+0000` form.
pub fn format_long_date(value: &DateTime<Utc>) -> String {
    value.format(LONG_PATTERN).to_string()
}

/// Render a calendar date in the short convention
pub fn format_short_date(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

fn parse_with(convention: DateConvention, text: &str) -> Option<DateTime<Utc>> {
    match convention {
        DateConvention::UnixSeconds => parse_unix_seconds(text),
        DateConvention::Long => DateTime::parse_from_str(text, convention.pattern()?)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        DateConvention::LongWithoutOffset => {
            NaiveDateTime::parse_from_str(text, convention.pattern()?)
                .ok()
                .map(|parsed| parsed.and_utc())
        }
        _ => parse_calendar(convention, text)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|parsed| parsed.and_utc()),
    }
}

fn parse_calendar(convention: DateConvention, text: &str) -> Option<NaiveDate> {
    match convention {
        DateConvention::MonthYear => {
            NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok()
        }
        _ => NaiveDate::parse_from_str(text, convention.pattern()?).ok(),
    }
}

fn parse_unix_seconds(text: &str) -> Option<DateTime<Utc>> {
    if !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    DateTime::from_timestamp(text.parse().ok()?, 0)
}

impl FromGraph for DateTime<Utc> {
    const KIND: TargetKind = TargetKind::Scalar;

    fn target_name() -> &'static str {
        "DateTime<Utc>"
    }

    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        let parsed = match node {
            Value::Number(number) => number
                .as_i64()
                .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
            Value::String(text) => parse_long_date(text),
            other => return Err(cx.type_mismatch::<Self>(other)),
        };
        parsed.ok_or_else(|| cx.coercion::<Self>(node, "unrecognized date/time format"))
    }
}

impl ToGraph for DateTime<Utc> {
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        Ok(Value::String(format_long_date(self)))
    }
}

impl FromGraph for NaiveDate {
    const KIND: TargetKind = TargetKind::Scalar;

    fn target_name() -> &'static str {
        "NaiveDate"
    }

    // A full timestamp is accepted too; its calendar date (UTC) is kept.
    fn from_graph(node: &Value, cx: &mut MappingContext<'_>) -> MappingResult<Self> {
        let Value::String(text) = node else {
            return Err(cx.type_mismatch::<Self>(node));
        };
        parse_short_date(text)
            .or_else(|| parse_long_date(text).map(|parsed| parsed.date_naive()))
            .ok_or_else(|| cx.coercion::<Self>(node, "unrecognized date format"))
    }
}

impl ToGraph for NaiveDate {
    fn to_graph(&self, _cx: &SerializeContext<'_>) -> MappingResult<Value> {
        Ok(Value::String(format_short_date(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_long_with_offset() {
        let parsed = parse_long_date("2011-03-25T17:38:40+0000").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2011, 3, 25, 17, 38, 40).unwrap());

        let shifted = parse_long_date("2011-03-25T17:38:40+0200").unwrap();
        assert_eq!(shifted.hour(), 15);
    }

    #[test]
    fn test_long_without_offset_is_utc() {
        let parsed = parse_long_date("2011-03-25T17:38:40").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2011, 3, 25, 17, 38, 40).unwrap());
    }

    #[test]
    fn test_rfc3339_fallback() {
        let parsed = parse_long_date("2011-03-25T17:38:40Z").unwrap();
        assert_eq!(parsed.minute(), 38);
    }

    #[test]
    fn test_unix_seconds() {
        let parsed = parse_long_date("1300000000").unwrap();
        assert_eq!(parsed.timestamp(), 1_300_000_000);
        assert!(parse_long_date("-5").is_none());
    }

    #[test]
    fn test_short_conventions() {
        let expected = NaiveDate::from_ymd_opt(2011, 3, 25).unwrap();
        assert_eq!(parse_short_date("2011-03-25"), Some(expected));
        assert_eq!(parse_short_date("03/25/2011"), Some(expected));

        let month = parse_short_date("2011-03").unwrap();
        assert_eq!((month.year(), month.month(), month.day()), (2011, 3, 1));
    }

    #[test]
    fn test_unparseable_text() {
        assert!(parse_long_date("").is_none());
        assert!(parse_long_date("yesterday").is_none());
        assert!(parse_short_date("2011/25/03").is_none());
        assert!(parse_short_date("  ").is_none());
    }

    #[test]
    fn test_formatting() {
        let value = Utc.with_ymd_and_hms(2011, 3, 25, 17, 38, 40).unwrap();
        assert_eq!(format_long_date(&value), "2011-03-25T17:38:40+0000");
        let date = NaiveDate::from_ymd_opt(2011, 3, 5).unwrap();
        assert_eq!(format_short_date(&date), "2011-03-05");
    }

    #[test]
    fn test_fractional_seconds_survive() {
        let value = Utc.timestamp_millis_opt(1_300_000_000_123).unwrap();
        let text = format_long_date(&value);
        assert_eq!(text, "2011-03-13T07:06:40.123+0000");
        assert_eq!(parse_long_date(&text), Some(value));

        let micros = Utc.timestamp_opt(1_300_000_000, 456_789_000).unwrap();
        assert_eq!(parse_long_date(&format_long_date(&micros)), Some(micros));

        let naive = parse_long_date("2011-03-25T17:38:40.5").unwrap();
        assert_eq!(naive.nanosecond(), 500_000_000);
    }
}
