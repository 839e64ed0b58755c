//! Calendar arithmetic for the semi-monthly billing grid.
//!
//! All instants are timezone-naive local wall-clock times. Month lengths come
//! from the calendar, so February has 29 days in leap years.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// First day of the second period of each month.
pub const SECOND_HALF_START_DAY: u32 = 16;

/// Last day of the first period of each month.
pub const FIRST_HALF_END_DAY: u32 = 15;

/// Returns the first instant of the day.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Returns the last millisecond of the day (23:59:59.999).
#[must_use]
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN - Duration::milliseconds(1))
}

/// Returns the first instant of the day following `instant`.
#[must_use]
pub fn next_day_start(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_day(instant.date() + Days::new(1))
}

/// Returns the last calendar day of the month containing `date`.
#[must_use]
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    [31, 30, 29, 28]
        .into_iter()
        .find_map(|day| date.with_day(day))
        .unwrap_or(date)
}

/// Returns true if `date` is the last day of its month.
#[must_use]
pub fn is_month_end(date: NaiveDate) -> bool {
    date == last_day_of_month(date)
}

/// Returns the start of the canonical period containing `instant`.
///
/// Days 1-15 round down to the 1st, days 16 onward to the 16th.
#[must_use]
pub fn nearest_period_start_rounded_down(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    let day = if date.day() < SECOND_HALF_START_DAY {
        1
    } else {
        SECOND_HALF_START_DAY
    };
    start_of_day(date.with_day(day).unwrap_or(date))
}

/// Returns the end of the canonical period containing `instant`.
///
/// Days 1-15 round up to the end of the 15th, days 16 onward to the end of
/// the last day of the month.
#[must_use]
pub fn nearest_period_end_rounded_up(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    let last_day = if date.day() < SECOND_HALF_START_DAY {
        date.with_day(FIRST_HALF_END_DAY).unwrap_or(date)
    } else {
        last_day_of_month(date)
    };
    end_of_day(last_day)
}
