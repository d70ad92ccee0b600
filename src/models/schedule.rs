//! Schedule models.
//!
//! This module defines the schedule entry types consumed by schedule
//! resolution: who an entry applies to (scope), when it applies (pattern),
//! and the expected shift window. An entry with no window is an explicit
//! day off.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Who a schedule entry applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleScope {
    /// The entry applies to a single employee.
    Employee(String),
    /// The entry is an organisation-wide default.
    Org,
}

/// When a schedule entry applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePattern {
    /// The entry applies to exactly one calendar date.
    Date(NaiveDate),
    /// The entry applies to every occurrence of a weekday.
    Weekday(Weekday),
    /// The entry applies to every date.
    Always,
}

/// The expected shift for one day.
///
/// `expected_minutes` is carried separately from the window span because
/// unpaid breaks make the expected worked time shorter than the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Expected site-local start time.
    pub start: NaiveTime,
    /// Expected site-local end time.
    pub end: NaiveTime,
    /// Expected worked minutes for the day.
    pub expected_minutes: i64,
    /// Shortfall tolerated before a day stops counting as fully present.
    #[serde(default)]
    pub grace_minutes: i64,
}

/// One row of schedule configuration.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ScheduleEntry, SchedulePattern, ScheduleScope, ShiftWindow};
/// use chrono::{NaiveTime, Weekday};
///
/// let entry = ScheduleEntry {
///     scope: ScheduleScope::Employee("emp_001".to_string()),
///     pattern: SchedulePattern::Weekday(Weekday::Mon),
///     window: Some(ShiftWindow {
///         start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///         end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///         expected_minutes: 480,
///         grace_minutes: 10,
///     }),
/// };
/// assert!(!entry.is_day_off());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Who the entry applies to.
    pub scope: ScheduleScope,
    /// When the entry applies.
    pub pattern: SchedulePattern,
    /// The expected shift, or `None` for an explicit day off.
    #[serde(default)]
    pub window: Option<ShiftWindow>,
}

impl ScheduleEntry {
    /// Returns true if the entry's pattern covers the given date.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        match self.pattern {
            SchedulePattern::Date(d) => d == date,
            SchedulePattern::Weekday(weekday) => date.weekday() == weekday,
            SchedulePattern::Always => true,
        }
    }

    /// Returns true if the entry is scoped to the given employee.
    pub fn is_for_employee(&self, employee_id: &str) -> bool {
        matches!(&self.scope, ScheduleScope::Employee(id) if id == employee_id)
    }

    /// Returns true if the entry is an organisation-wide default.
    pub fn is_org_scoped(&self) -> bool {
        self.scope == ScheduleScope::Org
    }

    /// Returns true if the entry declares an explicit day off.
    pub fn is_day_off(&self) -> bool {
        self.window.is_none()
    }
}

/// The outcome of resolving an employee's schedule for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleResolution {
    /// A shift window is expected on this date.
    Scheduled(ShiftWindow),
    /// No work is expected on this date.
    NoSchedule,
}

impl ScheduleResolution {
    /// Returns the expected worked minutes, or zero when no work is
    /// expected.
    pub fn expected_minutes(&self) -> i64 {
        match self {
            ScheduleResolution::Scheduled(window) => window.expected_minutes,
            ScheduleResolution::NoSchedule => 0,
        }
    }

    /// Returns the tolerated shortfall in minutes, or zero when no work is
    /// expected.
    pub fn grace_minutes(&self) -> i64 {
        match self {
            ScheduleResolution::Scheduled(window) => window.grace_minutes,
            ScheduleResolution::NoSchedule => 0,
        }
    }

    /// Returns true if a shift window is expected.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleResolution::Scheduled(_))
    }
}
