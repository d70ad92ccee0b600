//! Monthly balance folding.
//!
//! This module folds daily attendance facts into a monthly balance. The
//! fold is pure, commutative, and associative, which is what makes
//! incremental recomputation safe: replaying days in any order, or
//! folding sub-ranges and merging the partial balances, always yields the
//! same totals.

use crate::models::{AttendanceStatus, DailyAttendance, MonthlyBalance, YearMonth};

/// Folds one day into a monthly balance.
///
/// A positive delta feeds the overtime total, a negative delta the
/// deficit total, and an absent status the absence count. Each day moves
/// at most one of the minute totals.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::fold_monthly_balance;
/// use attendance_engine::models::{
///     AttendanceStatus, DailyAttendance, MonthlyBalance, YearMonth,
/// };
/// use chrono::NaiveDate;
///
/// let day = DailyAttendance {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     status: AttendanceStatus::Present,
///     worked_minutes: 600,
///     expected_minutes: 480,
///     delta_minutes: 120,
///     warnings: Vec::new(),
/// };
///
/// let period = YearMonth::new(2026, 1).unwrap();
/// let balance = fold_monthly_balance(MonthlyBalance::new("emp_001", period), &day);
/// assert_eq!(balance.overtime_minutes, 120);
/// assert_eq!(balance.deficit_minutes, 0);
/// ```
pub fn fold_monthly_balance(balance: MonthlyBalance, day: &DailyAttendance) -> MonthlyBalance {
    let mut balance = balance;
    balance.overtime_minutes += day.delta_minutes.max(0);
    balance.deficit_minutes += (-day.delta_minutes).max(0);
    if day.status == AttendanceStatus::Absent {
        balance.absence_days += 1;
    }
    balance
}

/// Folds a slice of days into the balance for one employee-month.
///
/// Days outside the month are ignored, so callers may pass a wider
/// computation window unfiltered.
pub fn balance_for_days(
    employee_id: &str,
    period: YearMonth,
    days: &[DailyAttendance],
) -> MonthlyBalance {
    days.iter()
        .filter(|day| period.contains(day.date))
        .fold(MonthlyBalance::new(employee_id, period), fold_monthly_balance)
}
