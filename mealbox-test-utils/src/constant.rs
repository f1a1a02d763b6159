//! Shared values for test fixtures.
//!
//! All fixtures are anchored on [`test_now`] so tests stay deterministic
//! regardless of the wall clock.

use chrono::{NaiveDate, NaiveDateTime};

/// Cafeteria used by default for mock packages.
pub static TEST_CAFETERIA: &str = "Hogeschoollaan LA";

/// City used by default for mock students and packages.
pub static TEST_CITY: &str = "Breda";

/// Builds a date, panicking on an invalid calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("invalid test date")
}

/// Builds a timestamp, panicking on an invalid calendar date or time.
pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .expect("invalid test time")
}

/// The instant every test treats as "now": 2025-03-10 12:00 UTC.
pub fn test_now() -> NaiveDateTime {
    datetime(2025, 3, 10, 12, 0)
}
