//! Date validity policies
//!
//! Two policies accept different string shapes and are never merged:
//!
//! - [`DatePolicy::IsoTimestamp`] accepts ISO-8601 timestamps with a timezone designator, at
//!   second precision (optionally with a fraction) or minute precision. Bare dates are rejected.
//! - [`DatePolicy::Calendar`] accepts bare `YYYY-MM-DD` dates and checks them against the real
//!   calendar, including the Gregorian leap-year rule. Timestamps are rejected.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Macro to define regex patterns with consistent error handling
macro_rules! define_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($pattern).ok());
    };
}

// `[0-9]` rather than `\d`, which is Unicode-aware in the regex crate
define_regex!(
    ISO_TIMESTAMP_REGEX,
    r"^(?P<minutes>[0-9]{4}-[01][0-9]-[0-3][0-9]T[0-2][0-9]:[0-5][0-9])(?P<seconds>:[0-5][0-9](?:\.[0-9]+)?)?(?P<offset>Z|[+-][0-2][0-9]:[0-5][0-9])$"
);
define_regex!(
    CALENDAR_DATE_REGEX,
    r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})$"
);

/// Which strings count as a valid date
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// `YYYY-MM-DDThh:mm[:ss[.fraction]](Z|±hh:mm)`
    IsoTimestamp,
    /// `YYYY-MM-DD`, validated against the Gregorian calendar
    #[default]
    Calendar,
}

impl DatePolicy {
    /// Validate and parse `raw` under this policy
    ///
    /// Returns `None` when the string does not satisfy the policy.
    pub fn parse(self, raw: &str) -> Option<ParsedDate> {
        match self {
            Self::IsoTimestamp => parse_iso_timestamp(raw).map(ParsedDate::Timestamp),
            Self::Calendar => parse_calendar_date(raw).map(ParsedDate::Calendar),
        }
    }

    /// Whether `raw` satisfies this policy
    pub fn accepts(self, raw: &str) -> bool {
        self.parse(raw).is_some()
    }

    /// Accepted string shape, for diagnostics
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::IsoTimestamp => "YYYY-MM-DDThh:mm[:ss[.fraction]](Z|+hh:mm|-hh:mm)",
            Self::Calendar => "YYYY-MM-DD",
        }
    }
}

/// A date that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// Produced by [`DatePolicy::IsoTimestamp`]
    Timestamp(DateTime<FixedOffset>),
    /// Produced by [`DatePolicy::Calendar`]
    Calendar(NaiveDate),
}

impl ParsedDate {
    /// Calendar date in the value's own offset
    pub fn date_naive(&self) -> NaiveDate {
        match self {
            Self::Timestamp(timestamp) => timestamp.date_naive(),
            Self::Calendar(date) => *date,
        }
    }

    /// The timestamp, if this value carries a time of day
    pub const fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(timestamp) => Some(*timestamp),
            Self::Calendar(_) => None,
        }
    }
}

/// Gregorian leap year: divisible by 4, except centuries not divisible by 400
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`, `None` for an out-of-range month
pub const fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let captures = CALENDAR_DATE_REGEX.as_ref()?.captures(raw)?;
    let year: i32 = captures.name("year")?.as_str().parse().ok()?;
    let month: u32 = captures.name("month")?.as_str().parse().ok()?;
    let day: u32 = captures.name("day")?.as_str().parse().ok()?;

    if day == 0 || day > days_in_month(year, month)? {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

pub(crate) fn parse_iso_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let captures = ISO_TIMESTAMP_REGEX.as_ref()?.captures(raw)?;
    let minutes = captures.name("minutes")?.as_str();
    let offset = captures.name("offset")?.as_str();

    // RFC 3339 requires seconds, minute precision gets `:00`
    let normalized = captures.name("seconds").map_or_else(
        || format!("{minutes}:00{offset}"),
        |seconds| format!("{minutes}{}{offset}", seconds.as_str()),
    );

    DateTime::parse_from_rfc3339(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2020));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2021));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2021, 1), Some(31));
        assert_eq!(days_in_month(2021, 2), Some(28));
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2021, 4), Some(30));
        assert_eq!(days_in_month(2021, 13), None);
        assert_eq!(days_in_month(2021, 0), None);
    }

    #[test]
    fn test_calendar_policy_round_trip() {
        let parsed = DatePolicy::Calendar.parse("2021-04-01");
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2021, 4, 1).map(ParsedDate::Calendar)
        );
    }

    #[test]
    fn test_calendar_policy_leap_days() {
        assert!(!DatePolicy::Calendar.accepts("2021-02-29"));
        assert!(DatePolicy::Calendar.accepts("2020-02-29"));
        assert!(DatePolicy::Calendar.accepts("2000-02-29"));
        assert!(!DatePolicy::Calendar.accepts("1900-02-29"));
    }

    #[test]
    fn test_calendar_policy_rejects_impossible_days() {
        assert!(!DatePolicy::Calendar.accepts("2021-04-31"));
        assert!(!DatePolicy::Calendar.accepts("2021-13-01"));
        assert!(!DatePolicy::Calendar.accepts("2021-00-10"));
        assert!(!DatePolicy::Calendar.accepts("2021-01-00"));
        assert!(DatePolicy::Calendar.accepts("2021-12-31"));
    }

    #[test]
    fn test_calendar_policy_rejects_other_shapes() {
        assert!(!DatePolicy::Calendar.accepts("2021-04-01T10:00:00Z"));
        assert!(!DatePolicy::Calendar.accepts("2021-4-1"));
        assert!(!DatePolicy::Calendar.accepts(" 2021-04-01"));
        assert!(!DatePolicy::Calendar.accepts("test"));
        assert!(!DatePolicy::Calendar.accepts("２０２１-04-01"));
    }

    #[test]
    fn test_iso_policy_accepts_timestamp_variants() {
        assert!(DatePolicy::IsoTimestamp.accepts("2021-04-01T10:30:15Z"));
        assert!(DatePolicy::IsoTimestamp.accepts("2021-04-01T10:30:15.123Z"));
        assert!(DatePolicy::IsoTimestamp.accepts("2021-04-01T10:30:15+02:00"));
        assert!(DatePolicy::IsoTimestamp.accepts("2021-04-01T10:30:15.5-05:30"));
        assert!(DatePolicy::IsoTimestamp.accepts("2021-04-01T10:30Z"));
        assert!(DatePolicy::IsoTimestamp.accepts("2021-04-01T10:30+01:00"));
    }

    #[test]
    fn test_iso_policy_rejects_bare_dates_and_missing_offsets() {
        assert!(!DatePolicy::IsoTimestamp.accepts("2021-04-01"));
        assert!(!DatePolicy::IsoTimestamp.accepts("2021-04-01T10:30:15"));
        assert!(!DatePolicy::IsoTimestamp.accepts("2021-04-01 10:30:15Z"));
        assert!(!DatePolicy::IsoTimestamp.accepts("prefix 2021-04-01T10:30:15Z"));
    }

    #[test]
    fn test_iso_policy_rejects_impossible_instants() {
        // Matches the pattern but names month 19 / hour 29
        assert!(!DatePolicy::IsoTimestamp.accepts("2021-19-01T10:30:15Z"));
        assert!(!DatePolicy::IsoTimestamp.accepts("2021-04-01T29:30:15Z"));
        assert!(!DatePolicy::IsoTimestamp.accepts("2021-02-30T10:30:15Z"));
    }

    #[test]
    fn test_iso_policy_parses_offset_and_minute_precision() {
        let timestamp = DatePolicy::IsoTimestamp
            .parse("2021-04-01T10:30+02:00")
            .and_then(|parsed| parsed.timestamp());

        assert_eq!(timestamp.map(|t| t.year()), Some(2021));
        assert_eq!(timestamp.map(|t| t.month()), Some(4));
        assert_eq!(timestamp.map(|t| t.hour()), Some(10));
        assert_eq!(timestamp.map(|t| t.minute()), Some(30));
        assert_eq!(timestamp.map(|t| t.second()), Some(0));
        assert_eq!(
            timestamp.map(|t| t.offset().local_minus_utc()),
            Some(2 * 3600)
        );
    }

    #[test]
    fn test_parsed_date_accessors() {
        let timestamp = DatePolicy::IsoTimestamp.parse("2021-04-01T23:30:00-01:00");
        assert_eq!(
            timestamp.map(|parsed| parsed.date_naive()),
            NaiveDate::from_ymd_opt(2021, 4, 1)
        );
        assert!(timestamp.and_then(|parsed| parsed.timestamp()).is_some());

        let calendar = DatePolicy::Calendar.parse("2021-04-01");
        assert!(calendar.and_then(|parsed| parsed.timestamp()).is_none());
    }

    #[test]
    fn test_policy_parses_from_str() {
        assert_eq!(
            "iso_timestamp".parse::<DatePolicy>().ok(),
            Some(DatePolicy::IsoTimestamp)
        );
        assert_eq!("calendar".parse::<DatePolicy>().ok(), Some(DatePolicy::Calendar));
        assert!("bogus".parse::<DatePolicy>().is_err());
        assert_eq!(DatePolicy::IsoTimestamp.to_string(), "iso_timestamp");
        assert_eq!(DatePolicy::VARIANTS, &["iso_timestamp", "calendar"]);
    }
}
