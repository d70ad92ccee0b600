//! Punch event model.
//!
//! This module defines the PunchEvent struct and PunchDirection enum that
//! form the raw input to interval reconciliation. Punch events are
//! append-only facts recorded by clock terminals and mobile apps; the
//! engine never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction of a punch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchDirection {
    /// The employee clocked in, opening a work interval.
    In,
    /// The employee clocked out, closing a work interval.
    Out,
}

impl fmt::Display for PunchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PunchDirection::In => write!(f, "in"),
            PunchDirection::Out => write!(f, "out"),
        }
    }
}

/// A single clock-in or clock-out event.
///
/// The punched instant (`punched_at`) is when the employee actually
/// punched; the insertion timestamp (`recorded_at`) is when the event
/// reached the store. The two differ when terminals buffer punches
/// offline and upload them later, which is why reconciliation orders by
/// punched instant and uses the insertion timestamp only as a tie-break.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PunchDirection, PunchEvent};
/// use chrono::{TimeZone, Utc};
///
/// let punch = PunchEvent {
///     employee_id: "emp_001".to_string(),
///     punched_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
///     direction: PunchDirection::In,
///     source: "terminal_1".to_string(),
///     recorded_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 2).unwrap(),
/// };
/// assert_eq!(punch.direction, PunchDirection::In);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// The employee who punched.
    pub employee_id: String,
    /// The instant the punch happened, in UTC.
    pub punched_at: DateTime<Utc>,
    /// Whether this punch opens or closes an interval.
    pub direction: PunchDirection,
    /// The device or channel that produced the punch (e.g., "terminal_1").
    #[serde(default)]
    pub source: String,
    /// The instant the punch was inserted into the store, in UTC.
    pub recorded_at: DateTime<Utc>,
}
