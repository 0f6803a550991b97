//! Calendar arithmetic over `chrono::NaiveDate`
//!
//! Month offsets keep the anchor's day-of-month and clamp it to the target
//! month's length (Jan 31 + 1 month = Feb 28/29). Month indices count months
//! since January of year 0 so that schedule steps reduce to integer math.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`
#[inline]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    const DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Build a date whose day has already been clamped to the month length
fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("day clamped to month length")
}

/// Last calendar day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    clamped_date(date.year(), date.month(), 31)
}

/// Months elapsed since January of year 0
#[inline]
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Date in the month identified by `index` with `day` clamped to the month length
pub fn month_from_index(index: i32, day: u32) -> NaiveDate {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    clamped_date(year, month, day)
}

/// Shift `anchor` by `months` (may be negative), keeping its day-of-month
pub fn add_months(anchor: NaiveDate, months: i32) -> NaiveDate {
    month_from_index(month_index(anchor) + months, anchor.day())
}

#[inline]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Roll a weekend date forward to Monday; weekdays are returned unchanged
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut rolled = date;
    while is_weekend(rolled) {
        rolled = rolled + Duration::days(1);
    }
    rolled
}

/// `n` consecutive days starting at `start`
pub fn daily_range(start: NaiveDate, n: u32) -> impl Iterator<Item = NaiveDate> {
    (0..n as i64).map(move |offset| start + Duration::days(offset))
}
