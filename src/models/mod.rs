//! Core data models for the attendance and time-balance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod balance;
mod employee;
mod period;
mod punch;
mod schedule;
mod summary;
mod work_interval;

pub use attendance::{AttendanceStatus, DailyAttendance, DataQualityWarning};
pub use balance::MonthlyBalance;
pub use employee::Employee;
pub use period::{DateRange, YearMonth};
pub use punch::{PunchDirection, PunchEvent};
pub use schedule::{
    ScheduleEntry, SchedulePattern, ScheduleResolution, ScheduleScope, ShiftWindow,
};
pub use summary::{minutes_as_hours, DashboardSummary};
pub use work_interval::{IntervalQuality, WorkInterval};
