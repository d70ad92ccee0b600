//! Daily attendance derivation.
//!
//! This module compares one day's reconciled work intervals against the
//! resolved schedule to produce the day's attendance fact: status, worked
//! minutes, expected minutes, and the signed delta that feeds the monthly
//! balance.

use chrono::NaiveDate;

use crate::config::EnginePolicy;
use crate::models::{
    AttendanceStatus, DailyAttendance, DataQualityWarning, IntervalQuality, ScheduleResolution,
    WorkInterval,
};

/// Computes the attendance fact for one employee on one date.
///
/// Worked minutes sum the durations of complete and inferred intervals
/// attributed to the date. Anomalous intervals are counted or excluded
/// per policy, with a data-quality warning either way. Open intervals
/// contribute nothing; an open interval on a past date additionally warns
/// because past days must be fully closed.
///
/// The grace period affects only the status boundary between present and
/// partial. The delta is always `worked - expected`, except on absent and
/// day-off days where it is clamped to zero so those days never feed the
/// overtime or deficit totals.
///
/// # Arguments
///
/// * `employee_id` - The employee the day belongs to
/// * `date` - The calendar date being assessed
/// * `intervals` - Reconciled intervals; entries for other dates are ignored
/// * `resolution` - The resolved schedule for this date
/// * `policy` - Engine policy (anomalous-minute handling)
/// * `today` - The current site-local date
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::compute_daily_attendance;
/// use attendance_engine::config::EnginePolicy;
/// use attendance_engine::models::{AttendanceStatus, ScheduleResolution};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let day = compute_daily_attendance(
///     "emp_001",
///     date,
///     &[],
///     &ScheduleResolution::NoSchedule,
///     &EnginePolicy::default(),
///     date,
/// );
/// assert_eq!(day.status, AttendanceStatus::Excused);
/// assert_eq!(day.delta_minutes, 0);
/// ```
pub fn compute_daily_attendance(
    employee_id: &str,
    date: NaiveDate,
    intervals: &[WorkInterval],
    resolution: &ScheduleResolution,
    policy: &EnginePolicy,
    today: NaiveDate,
) -> DailyAttendance {
    let mut warnings = Vec::new();
    let mut worked_minutes: i64 = 0;
    let mut anomalous_minutes: i64 = 0;
    let mut open_on_past_date = false;

    for interval in intervals.iter().filter(|interval| interval.date == date) {
        match interval.quality {
            IntervalQuality::Complete | IntervalQuality::Inferred => {
                worked_minutes += interval.duration_minutes();
            }
            IntervalQuality::Anomalous => {
                anomalous_minutes += interval.duration_minutes();
            }
            IntervalQuality::Open => {
                if date < today {
                    open_on_past_date = true;
                }
            }
        }
    }

    if anomalous_minutes > 0 {
        if policy.count_anomalous_minutes {
            worked_minutes += anomalous_minutes;
            warnings.push(DataQualityWarning::new(
                "anomalous_minutes_counted",
                format!(
                    "{} minutes from anomalous intervals counted as worked time",
                    anomalous_minutes
                ),
                "low",
            ));
        } else {
            warnings.push(DataQualityWarning::new(
                "anomalous_minutes_excluded",
                format!(
                    "{} minutes from anomalous intervals excluded from worked time",
                    anomalous_minutes
                ),
                "medium",
            ));
        }
    }

    if open_on_past_date {
        warnings.push(DataQualityWarning::new(
            "open_interval_on_past_date",
            format!("an interval on {} is still open; past days must be closed", date),
            "high",
        ));
    }

    let expected_minutes = resolution.expected_minutes();
    let (status, delta_minutes) = if !resolution.is_scheduled() {
        if worked_minutes > 0 {
            (AttendanceStatus::Present, worked_minutes)
        } else {
            (AttendanceStatus::Excused, 0)
        }
    } else if worked_minutes == 0 {
        // Absence is tracked as a day count, not as deficit minutes.
        (AttendanceStatus::Absent, 0)
    } else if worked_minutes >= expected_minutes - resolution.grace_minutes() {
        (AttendanceStatus::Present, worked_minutes - expected_minutes)
    } else {
        (AttendanceStatus::Partial, worked_minutes - expected_minutes)
    };

    DailyAttendance {
        employee_id: employee_id.to_string(),
        date,
        status,
        worked_minutes,
        expected_minutes,
        delta_minutes,
        warnings,
    }
}
