//! Punch pairing and interval reconciliation.
//!
//! This module walks a normalized punch stream and pairs clock-ins with
//! clock-outs into work intervals, repairing the malformed sequences that
//! real punch data contains: missed clock-outs, stray clock-outs, and
//! punches left dangling at the edge of the fetched window.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::EnginePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DataQualityWarning, IntervalQuality, PunchDirection, PunchEvent, WorkInterval,
};

use super::day_boundary::{apply_midnight_policy, local_date_of, local_midnight};
use super::punch_order::normalize_punches;

/// What to do with a clock-out at the head of the fetched window.
///
/// A leading clock-out usually means the matching clock-in sits just
/// before the window. The caller first reconciles with [`Reject`], and on
/// failure refetches with a wider lookback and retries with
/// [`ClampToMidnight`] so one corrupt day cannot wedge the pipeline.
///
/// [`Reject`]: LeadingOutPolicy::Reject
/// [`ClampToMidnight`]: LeadingOutPolicy::ClampToMidnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingOutPolicy {
    /// Fail reconciliation with `MalformedPunchSequence`.
    Reject,
    /// Count an anomalous interval from the site-local midnight of the
    /// clock-out's day.
    ClampToMidnight,
}

/// The outcome of reconciling one employee's punch stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// Derived intervals, ordered by start instant.
    pub intervals: Vec<WorkInterval>,
    /// Warnings for every repair and every dropped punch.
    pub warnings: Vec<DataQualityWarning>,
}

/// Pairs an ordered punch stream into work intervals.
///
/// The walk keeps at most one open interval. A clock-in opens it; a
/// clock-out closes it. Deviations are repaired rather than propagated:
///
/// - A clock-in while an interval is open force-closes the prior interval
///   `tick_seconds` before the new clock-in, marked anomalous.
/// - A clock-out with nothing open mid-stream is dropped.
/// - A clock-out with nothing open at the head of the stream follows
///   `leading_out`.
/// - A clock-in left open at the end of the stream stays open if it is
///   from `today`, and becomes an unclosed anomalous interval otherwise.
///
/// Zero-length and negative intervals are discarded with a warning.
///
/// # Arguments
///
/// * `employee_id` - The employee the punches belong to
/// * `punches` - The punch stream in canonical order
/// * `tz` - The site timezone used to attribute intervals to days
/// * `today` - The current site-local date
/// * `tick_seconds` - Offset applied when force-closing a dangling interval
/// * `leading_out` - Policy for a clock-out at the head of the stream
///
/// # Returns
///
/// The derived intervals and repair warnings, or `MalformedPunchSequence`
/// when a leading clock-out is rejected.
pub fn pair_punches(
    employee_id: &str,
    punches: &[PunchEvent],
    tz: Tz,
    today: NaiveDate,
    tick_seconds: i64,
    leading_out: LeadingOutPolicy,
) -> EngineResult<ReconciliationResult> {
    let mut intervals = Vec::new();
    let mut warnings = Vec::new();
    let mut open_start: Option<DateTime<Utc>> = None;
    let mut at_stream_head = true;

    for punch in punches {
        match punch.direction {
            PunchDirection::In => {
                if let Some(start) = open_start {
                    // A second clock-in means the clock-out in between
                    // was missed. Close the dangling interval just before
                    // the new clock-in.
                    let forced_end = punch.punched_at - Duration::seconds(tick_seconds);
                    if forced_end > start {
                        intervals.push(make_interval(
                            employee_id,
                            tz,
                            start,
                            Some(forced_end),
                            IntervalQuality::Anomalous,
                        ));
                        warnings.push(DataQualityWarning::new(
                            "missed_clock_out",
                            format!(
                                "clock-in at {} while an interval opened at {} was still open; prior interval force-closed",
                                punch.punched_at, start
                            ),
                            "medium",
                        ));
                    } else {
                        warnings.push(DataQualityWarning::new(
                            "discarded_interval",
                            format!(
                                "interval opened at {} would close at or before its start; discarded",
                                start
                            ),
                            "medium",
                        ));
                    }
                }
                open_start = Some(punch.punched_at);
            }
            PunchDirection::Out => match open_start.take() {
                Some(start) => {
                    if punch.punched_at > start {
                        intervals.push(make_interval(
                            employee_id,
                            tz,
                            start,
                            Some(punch.punched_at),
                            IntervalQuality::Complete,
                        ));
                    } else {
                        warnings.push(DataQualityWarning::new(
                            "zero_length_interval",
                            format!(
                                "clock-in and clock-out both at {}; interval discarded",
                                punch.punched_at
                            ),
                            "low",
                        ));
                    }
                }
                None if at_stream_head => match leading_out {
                    LeadingOutPolicy::Reject => {
                        return Err(EngineError::MalformedPunchSequence {
                            employee_id: employee_id.to_string(),
                            message: format!(
                                "clock-out at {} with no preceding clock-in in the fetched window",
                                punch.punched_at
                            ),
                        });
                    }
                    LeadingOutPolicy::ClampToMidnight => {
                        let date = local_date_of(tz, punch.punched_at);
                        let midnight = local_midnight(tz, date);
                        if punch.punched_at > midnight {
                            intervals.push(make_interval(
                                employee_id,
                                tz,
                                midnight,
                                Some(punch.punched_at),
                                IntervalQuality::Anomalous,
                            ));
                        }
                        warnings.push(DataQualityWarning::new(
                            "leading_clock_out_clamped",
                            format!(
                                "clock-out at {} had no clock-in even after widening the lookback; counted from local midnight",
                                punch.punched_at
                            ),
                            "high",
                        ));
                    }
                },
                None => {
                    warnings.push(DataQualityWarning::new(
                        "unmatched_clock_out",
                        format!(
                            "clock-out at {} with no open interval; dropped",
                            punch.punched_at
                        ),
                        "medium",
                    ));
                }
            },
        }
        at_stream_head = false;
    }

    if let Some(start) = open_start {
        let date = local_date_of(tz, start);
        if date == today {
            intervals.push(make_interval(
                employee_id,
                tz,
                start,
                None,
                IntervalQuality::Open,
            ));
        } else {
            intervals.push(make_interval(
                employee_id,
                tz,
                start,
                None,
                IntervalQuality::Anomalous,
            ));
            warnings.push(DataQualityWarning::new(
                "unclosed_interval",
                format!("interval opened at {} on {} has no clock-out", start, date),
                "high",
            ));
        }
    }

    Ok(ReconciliationResult {
        intervals,
        warnings,
    })
}

/// Reconciles a raw punch stream into policy-shaped work intervals.
///
/// Composes the full pipeline: normalization, pairing, and midnight
/// attribution. This is the entry point the metrics layer uses.
///
/// # Arguments
///
/// * `employee_id` - The employee the punches belong to
/// * `punches` - The punch stream, in any order
/// * `tz` - The site timezone
/// * `today` - The current site-local date
/// * `policy` - Engine policy (tick seconds and midnight attribution)
/// * `leading_out` - Policy for a clock-out at the head of the stream
pub fn reconcile_punches(
    employee_id: &str,
    punches: &[PunchEvent],
    tz: Tz,
    today: NaiveDate,
    policy: &EnginePolicy,
    leading_out: LeadingOutPolicy,
) -> EngineResult<ReconciliationResult> {
    let normalization = normalize_punches(punches);
    let paired = pair_punches(
        employee_id,
        &normalization.punches,
        tz,
        today,
        policy.tick_seconds,
        leading_out,
    )?;

    let intervals = apply_midnight_policy(paired.intervals, tz, policy.midnight);

    let mut warnings = normalization.warnings;
    warnings.extend(paired.warnings);

    Ok(ReconciliationResult {
        intervals,
        warnings,
    })
}

fn make_interval(
    employee_id: &str,
    tz: Tz,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    quality: IntervalQuality,
) -> WorkInterval {
    WorkInterval {
        employee_id: employee_id.to_string(),
        date: local_date_of(tz, start),
        start,
        end,
        quality,
    }
}
