//! Daily attendance model.
//!
//! This module defines the DailyAttendance struct produced by daily
//! aggregation, along with the AttendanceStatus enum and the data-quality
//! warnings attached to a day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The attendance status of one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Worked at least the expected minutes less grace, or worked on an
    /// unscheduled day.
    Present,
    /// Scheduled to work but recorded no worked minutes.
    Absent,
    /// Worked, but less than the expected minutes less grace.
    Partial,
    /// Not scheduled and did not work.
    Excused,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Partial => write!(f, "partial"),
            AttendanceStatus::Excused => write!(f, "excused"),
        }
    }
}

/// A warning describing a data-quality issue found while deriving a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    /// Stable machine-readable code (e.g., "missed_clock_out").
    pub code: String,
    /// Human-readable description of the issue.
    pub message: String,
    /// Severity level: "low", "medium", or "high".
    pub severity: String,
}

impl DataQualityWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The derived attendance facts for one employee on one day.
///
/// `delta_minutes` is the day's contribution to the monthly balance:
/// positive for overtime, negative for deficit, zero for absent and
/// excused days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendance {
    /// The employee this day belongs to.
    pub employee_id: String,
    /// The site-local calendar day.
    pub date: NaiveDate,
    /// The derived attendance status.
    pub status: AttendanceStatus,
    /// Minutes actually worked, summed over countable intervals.
    pub worked_minutes: i64,
    /// Minutes expected by the resolved schedule, zero when unscheduled.
    pub expected_minutes: i64,
    /// Signed balance contribution for the day.
    pub delta_minutes: i64,
    /// Data-quality warnings collected while deriving the day.
    #[serde(default)]
    pub warnings: Vec<DataQualityWarning>,
}
