//! Date formats used by the remote API

use serde::{Deserialize, Serialize};

/// Date/time conventions the API is known to emit
///
/// Patterns use strftime syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateConvention {
    /// `2011-03-25T17:38:40+0000`, with optional fractional seconds
    Long,
    /// `2011-03-25T17:38:40`, interpreted as UTC, with optional fractional seconds
    LongWithoutOffset,
    /// `2011-03-25`
    Short,
    /// `03/25/2011`
    AlternateShort,
    /// `2011-03`
    MonthYear,
    /// Seconds since the Unix epoch, as a number or an all-digit string
    UnixSeconds,
}

impl DateConvention {
    /// Conventions tried, in order, when a long date/time is expected
    pub const LONG_FALLBACKS: [DateConvention; 3] = [
        DateConvention::UnixSeconds,
        DateConvention::Long,
        DateConvention::LongWithoutOffset,
    ];

    /// Conventions tried, in order, when a calendar date is expected
    pub const SHORT_FALLBACKS: [DateConvention; 3] = [
        DateConvention::Short,
        DateConvention::AlternateShort,
        DateConvention::MonthYear,
    ];

    /// strftime pattern, if the convention is pattern based
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            DateConvention::Long => Some("%Y-%m-%dT%H:%M:%S%.f%z"),
            DateConvention::LongWithoutOffset => Some("%Y-%m-%dT%H:%M:%S%.f"),
            DateConvention::Short => Some("%Y-%m-%d"),
            DateConvention::AlternateShort => Some("%m/%d/%Y"),
            DateConvention::MonthYear => Some("%Y-%m"),
            DateConvention::UnixSeconds => None,
        }
    }
}
