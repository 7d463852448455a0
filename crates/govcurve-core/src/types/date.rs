//! Date type for financial calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{CoreError, CoreResult};

/// Fixed year length, in days, used for all year-fraction calculations.
///
/// The coupon schedule and the curve time axis deliberately share this
/// single clock instead of a market day-count convention (Actual/365,
/// Actual/360). Changing it would shift every calibrated parameter set.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A calendar date for financial calculations.
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing
/// financial-specific operations and ensuring type safety. Dates are
/// date-only; no time-of-day component is carried.
///
/// # Example
///
/// ```rust
/// use govcurve_core::types::Date;
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// let next = date.add_months_eom(6).unwrap();
/// assert_eq!(next, Date::from_ymd(2025, 12, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date, clamping the day.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of months, preserving the end-of-month property.
    ///
    /// Behaves like [`Date::add_months`], except that when the source date
    /// is the last calendar day of its month the result is forced to the
    /// last calendar day of the target month. Feb 28 in a non-leap year
    /// therefore rolls to Feb 29 when a 12-month step lands in a leap
    /// year, and month-end coupon anchors do not drift when walking a
    /// schedule backward and forward.
    ///
    /// `months` may be negative.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months_eom(&self, months: i32) -> CoreResult<Self> {
        let stepped = self.add_months(months)?;
        if self.is_end_of_month() {
            Ok(stepped.end_of_month())
        } else {
            Ok(stepped)
        }
    }

    /// Calculates the number of calendar days between two dates.
    ///
    /// Positive when `other` is after `self`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the fraction of a fixed 365.25-day year between two dates.
    ///
    /// This is the time coordinate used on the curve axis; see
    /// [`DAYS_PER_YEAR`].
    #[must_use]
    pub fn year_fraction(&self, other: &Date) -> f64 {
        self.days_between(other) as f64 / DAYS_PER_YEAR
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the end of month for the current date.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        Date(
            NaiveDate::from_ymd_opt(self.year(), self.month(), self.days_in_month())
                .expect("end of month should always be valid"),
        )
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the next business day after this date.
    ///
    /// Steps one calendar day forward, then keeps stepping while the
    /// result lands on a Saturday or Sunday. No holiday calendar is
    /// consulted; a coupon date on July 4th still counts as a business
    /// day. This is a documented approximation.
    #[must_use]
    pub fn next_business_day(&self) -> Self {
        let mut date = self.add_days(1);
        while date.is_weekend() {
            date = date.add_days(1);
        }
        date
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Helper function to get days in a month for a given year.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => panic!("Invalid month: {month}"),
    }
}

/// Helper function to check if a year is a leap year.
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
