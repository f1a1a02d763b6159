//! Clock abstraction and calendar helpers.
//!
//! Every rule that depends on "now" (reservation windows, pickup times, age as of
//! today, the no-show sweep) reads the time through a [`Clock`] so boundary
//! conditions can be tested deterministically with [`FixedClock`].

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// Current time as a naive UTC timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Current UTC calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock reading the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Creates a clock that always returns `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }

    /// Returns a new clock advanced by `duration`.
    pub fn advanced(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Returns the half-open range `[start, end)` covering a calendar day.
///
/// # Arguments
/// - `date` - Calendar day to cover
///
/// # Returns
/// - `(NaiveDateTime, NaiveDateTime)` - Midnight of `date` and midnight of the following day
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(chrono::NaiveTime::MIN);
    (start, start + Duration::days(1))
}

/// Age in whole years on `reference`.
///
/// The birthday counts as reached for the whole of its calendar day: only month
/// and day are compared, never time of day.
///
/// # Arguments
/// - `date_of_birth` - Date of birth
/// - `reference` - Date to compute the age on
///
/// # Returns
/// - `i32` - Completed years; negative when `reference` precedes the birth year
pub fn age_on(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}
