//! Monthly balance model.
//!
//! This module defines the MonthlyBalance struct that accumulates daily
//! attendance deltas into overtime and deficit totals for one calendar
//! month.

use serde::{Deserialize, Serialize};

use super::period::YearMonth;

/// Accumulated overtime, deficit, and absences for one employee-month.
///
/// Overtime and deficit accumulate independently: a +60 day and a -60 day
/// yield 60 minutes of overtime and 60 minutes of deficit, not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// The employee this balance belongs to.
    pub employee_id: String,
    /// The month this balance covers.
    pub period: YearMonth,
    /// Total minutes worked beyond daily expectations.
    pub overtime_minutes: i64,
    /// Total minutes short of daily expectations.
    pub deficit_minutes: i64,
    /// Number of days with status absent.
    pub absence_days: u32,
}

impl MonthlyBalance {
    /// Creates an empty balance for the given employee and month.
    pub fn new(employee_id: impl Into<String>, period: YearMonth) -> Self {
        Self {
            employee_id: employee_id.into(),
            period,
            overtime_minutes: 0,
            deficit_minutes: 0,
            absence_days: 0,
        }
    }

    /// Combines two partial balances for the same employee and month.
    ///
    /// Folding the days of a month in two halves and merging the results
    /// equals folding all days at once.
    pub fn merge(mut self, other: &MonthlyBalance) -> Self {
        self.overtime_minutes += other.overtime_minutes;
        self.deficit_minutes += other.deficit_minutes;
        self.absence_days += other.absence_days;
        self
    }

    /// Returns overtime minus deficit.
    pub fn net_minutes(&self) -> i64 {
        self.overtime_minutes - self.deficit_minutes
    }
}
