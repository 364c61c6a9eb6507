//! Booking date-range rules
//!
//! These are the only rules deciding whether a rental period is acceptable.
//! The service runs them before persisting a request; clients may run the
//! same functions to give early feedback, but only the service-side result
//! counts.

use crate::core::date::DateStamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reason a pair of booking dates was rejected
///
/// Variants are listed in the order the checks run. The first failing check
/// wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    #[error("Both fromDate and toDate are required.")]
    MissingField,

    #[error("Invalid date format for {field}: '{value}'. Use dd-mm-yyyy.")]
    BadFormat { field: &'static str, value: String },

    #[error("From Date must be at least {min_lead_days} day(s) after today.")]
    StartNotFuture { min_lead_days: i64 },

    #[error("To Date must be at least 1 day after From Date.")]
    EndBeforeStart,

    #[error("To Date must not exceed {max_span_days} days from From Date.")]
    SpanTooLong { max_span_days: i64 },
}

impl DateRangeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DateRangeError::MissingField => "MISSING_FIELD",
            DateRangeError::BadFormat { .. } => "BAD_DATE_FORMAT",
            DateRangeError::StartNotFuture { .. } => "START_NOT_FUTURE",
            DateRangeError::EndBeforeStart => "END_BEFORE_START",
            DateRangeError::SpanTooLong { .. } => "SPAN_TOO_LONG",
        }
    }
}

/// Lead time and maximum length of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    /// Minimum number of days between today and the start date
    pub min_lead_days: i64,

    /// Maximum number of whole days between start and end date
    pub max_span_days: i64,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            min_lead_days: 1,
            max_span_days: 14,
        }
    }
}

/// A validated rental period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRange {
    pub from: DateStamp,
    pub to: DateStamp,
}

impl BookingRange {
    /// Whole days between start and end
    pub fn span_days(&self) -> i64 {
        self.from.days_until(&self.to)
    }

    /// Half-open overlap test: a car returned on day N can go out again on day N
    pub fn overlaps(&self, other: &BookingRange) -> bool {
        self.from < other.to && other.from < self.to
    }
}

/// Presence and format checks only (rules 1 and 2)
///
/// Used where dates are copied from an already accepted request and lead time
/// no longer applies.
pub fn parse_range(from: &str, to: &str) -> Result<(DateStamp, DateStamp), DateRangeError> {
    if from.is_empty() || to.is_empty() {
        return Err(DateRangeError::MissingField);
    }

    let from = DateStamp::parse(from).map_err(|e| DateRangeError::BadFormat {
        field: "fromDate",
        value: e.value,
    })?;
    let to = DateStamp::parse(to).map_err(|e| DateRangeError::BadFormat {
        field: "toDate",
        value: e.value,
    })?;

    Ok((from, to))
}

impl BookingPolicy {
    /// Run every booking rule against `from`/`to` relative to `today`
    pub fn validate(
        &self,
        from: &str,
        to: &str,
        today: NaiveDate,
    ) -> Result<BookingRange, DateRangeError> {
        let (from, to) = parse_range(from, to)?;

        let today = DateStamp::from_naive(today);
        if today.days_until(&from) < self.min_lead_days {
            return Err(DateRangeError::StartNotFuture {
                min_lead_days: self.min_lead_days,
            });
        }

        let span = from.days_until(&to);
        if span <= 0 {
            return Err(DateRangeError::EndBeforeStart);
        }
        if span > self.max_span_days {
            return Err(DateRangeError::SpanTooLong {
                max_span_days: self.max_span_days,
            });
        }

        Ok(BookingRange { from, to })
    }
}

/// [`BookingPolicy::validate`] with the default policy
pub fn validate_range(
    from: &str,
    to: &str,
    today: NaiveDate,
) -> Result<BookingRange, DateRangeError> {
    BookingPolicy::default().validate(from, to, today)
}
