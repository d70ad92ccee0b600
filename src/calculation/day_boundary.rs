//! Site-local day boundary handling.
//!
//! Punch instants are stored in UTC, but attendance is judged against the
//! site's local calendar. This module converts instants to site-local
//! dates, computes the UTC instant of a local midnight (including DST
//! transitions that swallow midnight), and splits intervals that span a
//! local midnight.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::MidnightPolicy;
use crate::models::{IntervalQuality, WorkInterval};

/// Returns the site-local calendar date of a UTC instant.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::local_date_of;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// // 01:00 UTC is still the previous evening in Sao Paulo (UTC-3).
/// let instant = Utc.with_ymd_and_hms(2026, 1, 15, 1, 0, 0).unwrap();
/// let date = local_date_of(chrono_tz::America::Sao_Paulo, instant);
/// assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
/// ```
pub fn local_date_of(tz: Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Returns the UTC instant at which the given site-local date begins.
///
/// When a DST spring-forward swallows local midnight, the earliest valid
/// local time after the gap is used. Ambiguous local midnights resolve to
/// the earlier of the two instants.
///
/// # Arguments
///
/// * `tz` - The site timezone
/// * `date` - The site-local date
pub fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    let mut local = date.and_time(NaiveTime::MIN);

    // Step forward in half-hour increments until a valid local time exists.
    for _ in 0..48 {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(instant) => return instant.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => local += Duration::minutes(30),
        }
    }

    // Unreachable for tzdb data: no gap spans a whole day.
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Splits a closed interval at each site-local midnight it crosses.
///
/// # Arguments
///
/// * `interval` - The interval to split
/// * `tz` - The site timezone
///
/// # Returns
///
/// A vector of pieces, ordered chronologically. Each piece is attributed
/// to the site-local date it started on, and the pieces' durations sum to
/// the original duration.
///
/// # Behavior
///
/// - An open interval or one contained in a single local day is returned
///   unchanged
/// - A complete interval that is actually cut yields pieces with
///   [`IntervalQuality::Inferred`]
/// - An anomalous interval keeps its quality on every piece
pub fn split_at_local_midnights(interval: &WorkInterval, tz: Tz) -> Vec<WorkInterval> {
    let Some(end) = interval.end else {
        return vec![interval.clone()];
    };

    let end_date = local_date_of(tz, end);
    if local_date_of(tz, interval.start) == end_date {
        return vec![interval.clone()];
    }

    let mut pieces = Vec::new();
    let mut current_start = interval.start;

    while current_start < end {
        let current_date = local_date_of(tz, current_start);
        let next_midnight = match current_date.succ_opt() {
            Some(next_day) => local_midnight(tz, next_day),
            // The walk reached the last representable day.
            None => end,
        };

        // Piece ends at either the next local midnight or the interval
        // end, whichever comes first.
        let piece_end = if next_midnight <= end { next_midnight } else { end };

        if piece_end > current_start {
            pieces.push(WorkInterval {
                employee_id: interval.employee_id.clone(),
                date: current_date,
                start: current_start,
                end: Some(piece_end),
                quality: interval.quality,
            });
        }

        current_start = piece_end;
    }

    if pieces.len() > 1 && interval.quality == IntervalQuality::Complete {
        for piece in &mut pieces {
            piece.quality = IntervalQuality::Inferred;
        }
    }

    pieces
}

/// Applies the configured midnight policy to a batch of intervals.
///
/// Under [`MidnightPolicy::AttributeToStart`] the intervals pass through
/// unchanged; each already carries the local date of its clock-in. Under
/// [`MidnightPolicy::SplitAtMidnight`] every midnight-crossing interval is
/// replaced by its per-day pieces.
pub fn apply_midnight_policy(
    intervals: Vec<WorkInterval>,
    tz: Tz,
    policy: MidnightPolicy,
) -> Vec<WorkInterval> {
    match policy {
        MidnightPolicy::AttributeToStart => intervals,
        MidnightPolicy::SplitAtMidnight => intervals
            .iter()
            .flat_map(|interval| split_at_local_midnights(interval, tz))
            .collect(),
    }
}
