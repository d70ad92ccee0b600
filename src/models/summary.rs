//! Dashboard summary model.
//!
//! This module defines the DashboardSummary struct returned by the
//! metrics endpoint, plus the minute-to-hour conversion used for the
//! human-facing figures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Converts whole minutes to decimal hours rounded to two places.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::minutes_as_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_as_hours(120), Decimal::new(200, 2));
/// assert_eq!(minutes_as_hours(250), Decimal::new(417, 2));
/// ```
pub fn minutes_as_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

/// The fleet-wide metrics served to the dashboard.
///
/// Month-to-date figures cover closed days only: the 1st of the current
/// month through yesterday. Today is excluded because open intervals
/// would make its totals churn while people are still working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// When the summary was computed.
    pub generated_at: DateTime<Utc>,
    /// The engine version that produced the summary.
    pub engine_version: String,
    /// Number of active employees on the roster.
    pub active_employees: u32,
    /// Employees with at least one work interval today.
    pub present_today: u32,
    /// Employees scheduled today with no work interval yet.
    pub absent_today: u32,
    /// Time-adjustment requests awaiting a manager decision.
    pub pending_approvals: u32,
    /// Fleet overtime minutes for the month to date.
    pub month_to_date_overtime_minutes: i64,
    /// Fleet deficit minutes for the month to date.
    pub month_to_date_deficit_minutes: i64,
    /// Fleet overtime for the month to date, in decimal hours.
    pub month_to_date_overtime_hours: Decimal,
    /// Fleet deficit for the month to date, in decimal hours.
    pub month_to_date_deficit_hours: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_minutes_as_hours_exact() {
        assert_eq!(minutes_as_hours(480), Decimal::from(8));
        assert_eq!(minutes_as_hours(0), Decimal::ZERO);
    }

    #[test]
    fn test_minutes_as_hours_rounds_to_two_places() {
        // 250 minutes is 4.1666... hours
        assert_eq!(minutes_as_hours(250), Decimal::new(417, 2));
        // 100 minutes is 1.666... hours
        assert_eq!(minutes_as_hours(100), Decimal::new(167, 2));
    }

    #[test]
    fn test_minutes_as_hours_negative() {
        assert_eq!(minutes_as_hours(-90), Decimal::new(-150, 2));
    }

    #[test]
    fn test_serialize_summary() {
        let summary = DashboardSummary {
            generated_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            engine_version: "0.1.0".to_string(),
            active_employees: 12,
            present_today: 9,
            absent_today: 2,
            pending_approvals: 3,
            month_to_date_overtime_minutes: 720,
            month_to_date_deficit_minutes: 300,
            month_to_date_overtime_hours: minutes_as_hours(720),
            month_to_date_deficit_hours: minutes_as_hours(300),
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"active_employees\":12"));
        assert!(json.contains("\"present_today\":9"));
        assert!(json.contains("\"absent_today\":2"));
        assert!(json.contains("\"pending_approvals\":3"));
        assert!(json.contains("\"month_to_date_overtime_minutes\":720"));

        let deserialized: DashboardSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.month_to_date_overtime_hours, Decimal::from(12));
        assert_eq!(deserialized.month_to_date_deficit_hours, Decimal::from(5));
    }
}
