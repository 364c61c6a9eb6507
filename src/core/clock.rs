//! Time source used by booking rules

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" and "today"
///
/// Lead-time checks compare against today's date at whole-day resolution,
/// so the clock is injected instead of read directly.
pub trait Clock: Send + Sync {
    /// Current instant, used for `requestTime` / `rentalTime` stamps
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date
    fn today(&self) -> NaiveDate;
}

/// Wall clock; "today" follows the server's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Midnight UTC of the given day
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
