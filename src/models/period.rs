//! Date range and calendar month models.
//!
//! This module contains the [`DateRange`] and [`YearMonth`] types used to
//! define the aggregation window for attendance queries.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of site-local calendar days.
///
/// Ranges are used both as query windows and as cache keys, so they
/// implement `Hash` and `Eq`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// );
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()));
/// assert_eq!(range.days().count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day of the range (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the range (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range covering `start_date` through `end_date` inclusive.
    ///
    /// A range whose start is after its end is empty.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Creates a range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    /// Checks if a given date falls within this range.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the range covers no days.
    pub fn is_empty(&self) -> bool {
        self.start_date > self.end_date
    }

    /// Iterates the days of the range in ascending order.
    ///
    /// Both bounds are yielded, `NaiveDate::MAX` included when the range
    /// reaches it.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        let mut next = (self.start_date <= end).then_some(self.start_date);
        std::iter::from_fn(move || {
            let current = next?;
            next = if current < end { current.succ_opt() } else { None };
            Some(current)
        })
    }
}

/// A calendar month identified by year and month number.
///
/// Construction is validated, so `first_day` and `last_day` cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month)
            .ok_or_else(|| format!("invalid year-month {:04}-{:02}", raw.year, raw.month))
    }
}

impl YearMonth {
    /// Creates a validated year-month, or `None` if the month number is
    /// out of range or the year is outside chrono's supported span.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Returns the month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("year-month validated at construction")
    }

    /// Returns the last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        match self.first_day().checked_add_months(Months::new(1)) {
            Some(next_month) => next_month - Duration::days(1),
            None => NaiveDate::MAX,
        }
    }

    /// Returns the range of days covered by the month.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.first_day(), self.last_day())
    }

    /// Checks if a given date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
