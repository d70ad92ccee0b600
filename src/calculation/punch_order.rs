//! Punch stream normalization.
//!
//! Terminals buffer punches offline and upload them later, so the store
//! can hand back events out of order or more than once. This module puts
//! a punch stream into canonical order and drops retransmissions before
//! pairing runs.

use crate::models::{DataQualityWarning, PunchDirection, PunchEvent};

/// The result of normalizing a punch stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchNormalization {
    /// Punches in canonical order with retransmissions removed.
    pub punches: Vec<PunchEvent>,
    /// One warning per dropped retransmission.
    pub warnings: Vec<DataQualityWarning>,
}

/// Normalizes a single employee's punch stream.
///
/// Punches are ordered by punched instant, then by insertion timestamp,
/// then clock-ins before clock-outs. Two punches at the same instant with
/// the same direction are retransmissions of one physical punch: the
/// earliest-inserted copy is kept and the rest are dropped with a
/// warning.
///
/// Normalization is idempotent: running it on its own output changes
/// nothing.
///
/// # Arguments
///
/// * `punches` - The punch stream, in any order
///
/// # Returns
///
/// The canonical punch stream plus warnings for every dropped duplicate.
pub fn normalize_punches(punches: &[PunchEvent]) -> PunchNormalization {
    let mut sorted: Vec<PunchEvent> = punches.to_vec();
    sorted.sort_by(|a, b| {
        a.punched_at
            .cmp(&b.punched_at)
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
            .then_with(|| direction_rank(a.direction).cmp(&direction_rank(b.direction)))
    });

    let mut kept: Vec<PunchEvent> = Vec::with_capacity(sorted.len());
    let mut warnings = Vec::new();

    for punch in sorted {
        // Only punches at the same instant can be retransmissions, and
        // those sit together at the tail of `kept` after sorting.
        let is_retransmission = kept
            .iter()
            .rev()
            .take_while(|prior| prior.punched_at == punch.punched_at)
            .any(|prior| prior.direction == punch.direction);

        if is_retransmission {
            warnings.push(DataQualityWarning::new(
                "duplicate_punch_dropped",
                format!(
                    "duplicate {} punch at {} dropped as a retransmission",
                    punch.direction, punch.punched_at
                ),
                "low",
            ));
            continue;
        }

        kept.push(punch);
    }

    PunchNormalization {
        punches: kept,
        warnings,
    }
}

fn direction_rank(direction: PunchDirection) -> u8 {
    match direction {
        PunchDirection::In => 0,
        PunchDirection::Out => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn instant(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, hour, minute, 0).unwrap()
    }

    fn punch(
        direction: PunchDirection,
        punched_at: DateTime<Utc>,
        recorded_at: DateTime<Utc>,
    ) -> PunchEvent {
        PunchEvent {
            employee_id: "emp_001".to_string(),
            punched_at,
            direction,
            source: "terminal_1".to_string(),
            recorded_at,
        }
    }

    #[test]
    fn test_orders_by_punched_instant() {
        let stream = vec![
            punch(PunchDirection::Out, instant(17, 0), instant(17, 0)),
            punch(PunchDirection::In, instant(9, 0), instant(17, 1)),
        ];

        let result = normalize_punches(&stream);
        assert_eq!(result.punches.len(), 2);
        assert_eq!(result.punches[0].direction, PunchDirection::In);
        assert_eq!(result.punches[1].direction, PunchDirection::Out);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_same_instant_ordered_by_insertion() {
        let stream = vec![
            punch(PunchDirection::In, instant(9, 0), instant(9, 5)),
            punch(PunchDirection::Out, instant(9, 0), instant(9, 1)),
        ];

        let result = normalize_punches(&stream);
        assert_eq!(result.punches[0].direction, PunchDirection::Out);
        assert_eq!(result.punches[1].direction, PunchDirection::In);
    }

    #[test]
    fn test_same_instant_same_insertion_puts_in_first() {
        let stream = vec![
            punch(PunchDirection::Out, instant(9, 0), instant(9, 0)),
            punch(PunchDirection::In, instant(9, 0), instant(9, 0)),
        ];

        let result = normalize_punches(&stream);
        assert_eq!(result.punches[0].direction, PunchDirection::In);
        assert_eq!(result.punches[1].direction, PunchDirection::Out);
    }

    #[test]
    fn test_retransmission_is_dropped_with_warning() {
        let original = punch(PunchDirection::In, instant(9, 0), instant(9, 0));
        let retransmission = punch(PunchDirection::In, instant(9, 0), instant(9, 30));

        let result = normalize_punches(&[retransmission, original.clone()]);
        assert_eq!(result.punches, vec![original]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "duplicate_punch_dropped");
        assert_eq!(result.warnings[0].severity, "low");
    }

    #[test]
    fn test_keeps_earliest_inserted_copy() {
        let stream = vec![
            punch(PunchDirection::Out, instant(17, 0), instant(17, 45)),
            punch(PunchDirection::Out, instant(17, 0), instant(17, 2)),
            punch(PunchDirection::Out, instant(17, 0), instant(17, 10)),
        ];

        let result = normalize_punches(&stream);
        assert_eq!(result.punches.len(), 1);
        assert_eq!(result.punches[0].recorded_at, instant(17, 2));
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_opposite_directions_at_same_instant_both_kept() {
        let stream = vec![
            punch(PunchDirection::Out, instant(12, 0), instant(12, 0)),
            punch(PunchDirection::In, instant(12, 0), instant(12, 0)),
        ];

        let result = normalize_punches(&stream);
        assert_eq!(result.punches.len(), 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let stream = vec![
            punch(PunchDirection::Out, instant(17, 0), instant(17, 0)),
            punch(PunchDirection::In, instant(9, 0), instant(9, 0)),
            punch(PunchDirection::In, instant(9, 0), instant(9, 20)),
        ];

        let first = normalize_punches(&stream);
        let second = normalize_punches(&first.punches);
        assert_eq!(first.punches, second.punches);
        assert!(second.warnings.is_empty());
    }

    #[test]
    fn test_empty_stream() {
        let result = normalize_punches(&[]);
        assert!(result.punches.is_empty());
        assert!(result.warnings.is_empty());
    }
}
