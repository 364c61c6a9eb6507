//! Calendar dates in the `DD-MM-YYYY` wire format
//!
//! Booking dates travel as plain strings such as `"05-03-2026"`. A
//! [`DateStamp`] is only ever built from a string that has the exact shape
//! *and* names a real calendar day, so `31-02-2026` never gets past parsing.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// chrono format string matching the wire format
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// `\d` would also accept non-ASCII digits
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$").expect("static regex"));

/// Error returned when a string is not a valid `DD-MM-YYYY` date
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid dd-mm-yyyy date")]
pub struct InvalidDateStamp {
    pub value: String,
}

/// A calendar date without time component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateStamp(NaiveDate);

impl DateStamp {
    /// Parse a `DD-MM-YYYY` string
    ///
    /// The shape is checked first, then the day/month/year components are
    /// rebuilt into a date. Components that do not round-trip (day 31 in a
    /// 30-day month, month 13, 29-02 outside leap years) are rejected.
    pub fn parse(value: &str) -> Result<Self, InvalidDateStamp> {
        let invalid = || InvalidDateStamp {
            value: value.to_string(),
        };

        let caps = DATE_SHAPE.captures(value).ok_or_else(invalid)?;

        let day: u32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let year: i32 = caps[3].parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(invalid)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Whole days from `self` to `other` (negative when `other` is earlier)
    pub fn days_until(&self, other: &DateStamp) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl From<NaiveDate> for DateStamp {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DateStamp {
    type Err = InvalidDateStamp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for DateStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = DateStamp::parse("05-03-2026").unwrap();
        assert_eq!(date.as_naive(), NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(date.to_string(), "05-03-2026");
    }

    #[test]
    fn test_parse_leap_day() {
        assert!(DateStamp::parse("29-02-2028").is_ok());
        assert!(DateStamp::parse("29-02-2026").is_err());
    }

    #[test]
    fn test_rejects_impossible_calendar_dates() {
        for value in ["31-02-2026", "31-04-2026", "00-01-2026", "12-13-2026", "01-00-2026"] {
            assert!(DateStamp::parse(value).is_err(), "{} should be rejected", value);
        }
    }

    #[test]
    fn test_rejects_wrong_shape() {
        for value in [
            "",
            "5-3-2026",
            "05/03/2026",
            "2026-03-05",
            "05-03-26",
            "ab-cd-efgh",
            " 05-03-2026",
            "05-03-2026 ",
            "٠٥-٠٣-٢٠٢٦",
        ] {
            assert!(DateStamp::parse(value).is_err(), "{:?} should be rejected", value);
        }
    }

    #[test]
    fn test_days_until() {
        let a = DateStamp::parse("28-02-2026").unwrap();
        let b = DateStamp::parse("14-03-2026").unwrap();
        assert_eq!(a.days_until(&b), 14);
        assert_eq!(b.days_until(&a), -14);
        assert_eq!(a.days_until(&a), 0);
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let date = DateStamp::parse("01-12-2026").unwrap();
        let json = serde_json::to_value(date).unwrap();
        assert_eq!(json, serde_json::json!("01-12-2026"));

        let back: DateStamp = serde_json::from_value(json).unwrap();
        assert_eq!(back, date);

        let err = serde_json::from_value::<DateStamp>(serde_json::json!("31-11-2026"));
        assert!(err.is_err());
    }
}
