//! Work interval model.
//!
//! This module defines the WorkInterval struct and IntervalQuality enum
//! produced by punch reconciliation. Intervals are derived facts: they are
//! recomputed from the punch stream on demand and never stored back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// How trustworthy a reconciled interval is.
///
/// Quality is decided during reconciliation and drives both warning
/// generation and, via policy, whether the interval's minutes count
/// toward worked time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalQuality {
    /// A matched clock-in/clock-out pair.
    Complete,
    /// A clock-in from today with no clock-out yet; the employee is
    /// presumed still working.
    Open,
    /// A piece produced by splitting a complete interval at a site-local
    /// midnight.
    Inferred,
    /// An interval repaired from malformed punch data, such as a missed
    /// clock-out or a clock-out with no matching clock-in.
    Anomalous,
}

/// A contiguous span of worked time derived from a punch pair.
///
/// The `date` field carries the site-local day the interval is attributed
/// to, which is not always the UTC date of `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// The employee who worked this interval.
    pub employee_id: String,
    /// The site-local day this interval is attributed to.
    pub date: NaiveDate,
    /// The instant the interval started, in UTC.
    pub start: DateTime<Utc>,
    /// The instant the interval ended, in UTC. `None` while the interval
    /// is still open.
    pub end: Option<DateTime<Utc>>,
    /// How the interval was derived.
    pub quality: IntervalQuality,
}

impl WorkInterval {
    /// Returns the worked duration in whole minutes.
    ///
    /// Open intervals contribute zero minutes until they are closed.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{IntervalQuality, WorkInterval};
    /// use chrono::{NaiveDate, TimeZone, Utc};
    ///
    /// let interval = WorkInterval {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
    ///     end: Some(Utc.with_ymd_and_hms(2026, 1, 15, 16, 30, 0).unwrap()),
    ///     quality: IntervalQuality::Complete,
    /// };
    /// assert_eq!(interval.duration_minutes(), 270);
    /// ```
    pub fn duration_minutes(&self) -> i64 {
        match self.end {
            Some(end) => (end - self.start).num_minutes(),
            None => 0,
        }
    }

    /// Returns true if the interval has been closed by a clock-out or a
    /// reconciliation repair.
    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_interval(
        end: Option<DateTime<Utc>>,
        quality: IntervalQuality,
    ) -> WorkInterval {
        WorkInterval {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            start: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
            end,
            quality,
        }
    }

    #[test]
    fn test_duration_minutes_for_closed_interval() {
        let interval = create_test_interval(
            Some(Utc.with_ymd_and_hms(2026, 1, 15, 20, 0, 0).unwrap()),
            IntervalQuality::Complete,
        );
        assert_eq!(interval.duration_minutes(), 480);
        assert!(interval.is_closed());
    }

    #[test]
    fn test_duration_minutes_for_open_interval() {
        let interval = create_test_interval(None, IntervalQuality::Open);
        assert_eq!(interval.duration_minutes(), 0);
        assert!(!interval.is_closed());
    }

    #[test]
    fn test_duration_minutes_truncates_partial_minutes() {
        let interval = create_test_interval(
            Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 59).unwrap()),
            IntervalQuality::Complete,
        );
        assert_eq!(interval.duration_minutes(), 30);
    }

    #[test]
    fn test_duration_minutes_across_midnight() {
        let interval = WorkInterval {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            start: Utc.with_ymd_and_hms(2026, 1, 15, 22, 0, 0).unwrap(),
            end: Some(Utc.with_ymd_and_hms(2026, 1, 16, 6, 0, 0).unwrap()),
            quality: IntervalQuality::Complete,
        };
        assert_eq!(interval.duration_minutes(), 480);
    }

    #[test]
    fn test_quality_serialization() {
        assert_eq!(
            serde_json::to_string(&IntervalQuality::Complete).unwrap(),
            "\"complete\""
        );
        assert_eq!(
            serde_json::to_string(&IntervalQuality::Open).unwrap(),
            "\"open\""
        );
        assert_eq!(
            serde_json::to_string(&IntervalQuality::Inferred).unwrap(),
            "\"inferred\""
        );
        assert_eq!(
            serde_json::to_string(&IntervalQuality::Anomalous).unwrap(),
            "\"anomalous\""
        );
    }

    #[test]
    fn test_serialize_open_interval_round_trip() {
        let interval = create_test_interval(None, IntervalQuality::Open);
        let json = serde_json::to_string(&interval).unwrap();
        assert!(json.contains("\"end\":null"));

        let deserialized: WorkInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(interval, deserialized);
    }
}
