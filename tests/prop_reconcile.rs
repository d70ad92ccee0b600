//! Property-based tests for punch reconciliation and balance folding.
//!
//! These tests verify invariants that should hold for *any* punch stream
//! or attendance history, not just the curated cases in the unit tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use attendance_engine::calculation::{
    balance_for_days, compute_daily_attendance, reconcile_punches, LeadingOutPolicy,
    ReconciliationResult,
};
use attendance_engine::config::EnginePolicy;
use attendance_engine::models::{
    AttendanceStatus, DailyAttendance, PunchDirection, PunchEvent, ScheduleResolution, YearMonth,
};

// ---------------------------------------------------------------------------
// Strategies: bounded punch streams and attendance days
// ---------------------------------------------------------------------------

fn arb_direction() -> impl Strategy<Value = PunchDirection> {
    prop_oneof![Just(PunchDirection::In), Just(PunchDirection::Out)]
}

/// Generate a punch somewhere in a three-day window ending on `today()`,
/// with an insertion lag of up to ten minutes.
fn arb_punch() -> impl Strategy<Value = PunchEvent> {
    (0i64..STREAM_DAYS * 86_400, arb_direction(), 0i64..=600).prop_map(
        |(offset_seconds, direction, lag_seconds)| {
            let punched_at = window_start() + Duration::seconds(offset_seconds);
            PunchEvent {
                employee_id: "emp_prop".to_string(),
                punched_at,
                direction,
                source: "terminal_1".to_string(),
                recorded_at: punched_at + Duration::seconds(lag_seconds),
            }
        },
    )
}

fn arb_punch_stream() -> impl Strategy<Value = Vec<PunchEvent>> {
    prop::collection::vec(arb_punch(), 0..24)
}

/// A non-empty stream plus the index of a punch to retransmit and how
/// much later the copy lands in the store.
fn arb_stream_with_retransmission() -> impl Strategy<Value = (Vec<PunchEvent>, usize, i64)> {
    prop::collection::vec(arb_punch(), 1..24).prop_flat_map(|punches| {
        let len = punches.len();
        (Just(punches), 0..len, 1i64..=900)
    })
}

fn arb_status() -> impl Strategy<Value = AttendanceStatus> {
    prop_oneof![
        Just(AttendanceStatus::Present),
        Just(AttendanceStatus::Partial),
        Just(AttendanceStatus::Absent),
        Just(AttendanceStatus::Excused),
    ]
}

/// Generate an attendance day in January 2026. Absent and excused days
/// carry no minutes, matching what the daily derivation produces.
fn arb_attendance_day() -> impl Strategy<Value = DailyAttendance> {
    (1u32..=31, arb_status(), -480i64..=480).prop_map(|(day_of_month, status, delta)| {
        let (worked_minutes, delta_minutes) = match status {
            AttendanceStatus::Absent | AttendanceStatus::Excused => (0, 0),
            _ => ((480 + delta).max(0), delta),
        };
        DailyAttendance {
            employee_id: "emp_prop".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, day_of_month).unwrap(),
            status,
            worked_minutes,
            expected_minutes: 480,
            delta_minutes,
            warnings: Vec::new(),
        }
    })
}

fn arb_attendance_days() -> impl Strategy<Value = Vec<DailyAttendance>> {
    prop::collection::vec(arb_attendance_day(), 0..28)
}

/// A vec of attendance days plus a split point somewhere inside it.
fn arb_days_with_split() -> impl Strategy<Value = (Vec<DailyAttendance>, usize)> {
    prop::collection::vec(arb_attendance_day(), 0..28).prop_flat_map(|days| {
        let len = days.len();
        (Just(days), 0..=len)
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const STREAM_DAYS: i64 = 3;

fn window_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 13, 0, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

fn window_dates() -> [NaiveDate; 3] {
    [
        NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ]
}

fn january() -> YearMonth {
    YearMonth::new(2026, 1).unwrap()
}

/// Runs the full reconciliation pipeline under the clamping policy, which
/// accepts every stream instead of rejecting leading clock-outs.
fn reconcile(punches: &[PunchEvent]) -> ReconciliationResult {
    reconcile_punches(
        "emp_prop",
        punches,
        chrono_tz::UTC,
        today(),
        &EnginePolicy::default(),
        LeadingOutPolicy::ClampToMidnight,
    )
    .unwrap()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Every closed interval ends strictly after it starts
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn closed_intervals_end_after_they_start(punches in arb_punch_stream()) {
        let result = reconcile(&punches);

        for interval in &result.intervals {
            if let Some(end) = interval.end {
                prop_assert!(
                    end > interval.start,
                    "interval closed at or before its start: {:?}..{:?}",
                    interval.start,
                    end
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Intervals come out sorted and disjoint
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn intervals_are_sorted_and_disjoint(punches in arb_punch_stream()) {
        let result = reconcile(&punches);

        for window in result.intervals.windows(2) {
            prop_assert!(
                window[0].start <= window[1].start,
                "intervals out of order: {:?} then {:?}",
                window[0].start,
                window[1].start
            );
            // Only the final interval may still be open.
            prop_assert!(
                window[0].end.is_some(),
                "open-ended interval before the last: {:?}",
                window[0]
            );
            if let Some(end) = window[0].end {
                prop_assert!(
                    end <= window[1].start,
                    "interval ending {:?} overlaps the next start {:?}",
                    end,
                    window[1].start
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Reconciliation does not depend on input order
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn reconciliation_ignores_input_order(punches in arb_punch_stream()) {
        let forward = reconcile(&punches);

        let mut reversed = punches;
        reversed.reverse();
        let backward = reconcile(&reversed);

        prop_assert_eq!(forward, backward);
    }
}

// ---------------------------------------------------------------------------
// Property 4: A retransmitted punch changes warnings, never intervals
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn retransmissions_never_change_intervals(
        (punches, index, lag_seconds) in arb_stream_with_retransmission(),
    ) {
        let clean = reconcile(&punches);

        let mut noisy = punches;
        let mut copy = noisy[index].clone();
        copy.recorded_at = copy.recorded_at + Duration::seconds(lag_seconds);
        copy.source = "retransmit_buffer".to_string();
        noisy.push(copy);
        let with_duplicate = reconcile(&noisy);

        prop_assert_eq!(&clean.intervals, &with_duplicate.intervals);
        prop_assert_eq!(with_duplicate.warnings.len(), clean.warnings.len() + 1);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Intervals stay inside the fetched window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn intervals_stay_inside_the_fetched_window(punches in arb_punch_stream()) {
        let result = reconcile(&punches);
        let window_end = window_start() + Duration::days(STREAM_DAYS);

        for interval in &result.intervals {
            prop_assert!(
                interval.start >= window_start(),
                "interval starts before the window: {:?}",
                interval.start
            );
            if let Some(end) = interval.end {
                prop_assert!(
                    end <= window_end,
                    "interval ends after the window: {:?}",
                    end
                );
            }
            prop_assert!(
                interval.date >= window_dates()[0] && interval.date <= today(),
                "interval attributed outside the window: {}",
                interval.date
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Daily attendance agrees with the reconciled intervals
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn attendance_minutes_match_reconciled_intervals(punches in arb_punch_stream()) {
        let result = reconcile(&punches);
        let policy = EnginePolicy::default();

        for date in window_dates() {
            let day = compute_daily_attendance(
                "emp_prop",
                date,
                &result.intervals,
                &ScheduleResolution::NoSchedule,
                &policy,
                today(),
            );
            let interval_minutes: i64 = result
                .intervals
                .iter()
                .filter(|interval| interval.date == date)
                .map(|interval| interval.duration_minutes())
                .sum();

            prop_assert_eq!(
                day.worked_minutes,
                interval_minutes,
                "worked minutes diverge from interval durations on {}",
                date
            );
            // Unscheduled days: any work is present and all of it is delta.
            if day.worked_minutes > 0 {
                prop_assert_eq!(day.status, AttendanceStatus::Present);
                prop_assert_eq!(day.delta_minutes, day.worked_minutes);
            } else {
                prop_assert_eq!(day.status, AttendanceStatus::Excused);
                prop_assert_eq!(day.delta_minutes, 0);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 7: The balance fold is order independent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn balance_fold_is_order_independent(
        days in arb_attendance_days(),
        rotation in 0usize..32,
    ) {
        let forward = balance_for_days("emp_prop", january(), &days);

        let mut reordered = days;
        reordered.reverse();
        if !reordered.is_empty() {
            let pivot = rotation % reordered.len();
            reordered.rotate_left(pivot);
        }
        let shuffled = balance_for_days("emp_prop", january(), &reordered);

        prop_assert_eq!(forward, shuffled);
    }
}

// ---------------------------------------------------------------------------
// Property 8: Folding a partition and merging equals folding the whole
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn partial_folds_merge_to_the_whole((days, split) in arb_days_with_split()) {
        let whole = balance_for_days("emp_prop", january(), &days);
        let first = balance_for_days("emp_prop", january(), &days[..split]);
        let second = balance_for_days("emp_prop", january(), &days[split..]);

        prop_assert_eq!(whole, first.merge(&second));
    }
}

// ---------------------------------------------------------------------------
// Property 9: Net minutes equal the sum of deltas
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn net_minutes_equal_the_sum_of_deltas(days in arb_attendance_days()) {
        let balance = balance_for_days("emp_prop", january(), &days);

        let delta_sum: i64 = days.iter().map(|day| day.delta_minutes).sum();
        let absent_days = days
            .iter()
            .filter(|day| day.status == AttendanceStatus::Absent)
            .count() as u32;

        prop_assert_eq!(balance.net_minutes(), delta_sum);
        prop_assert_eq!(balance.absence_days, absent_days);
    }
}
