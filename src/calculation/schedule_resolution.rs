//! Schedule resolution.
//!
//! This module resolves which schedule entry governs an employee on a
//! calendar date. Entries are matched in four specificity tiers, most
//! specific first; the first tier with a match wins. Within the winning
//! tier exactly one entry may match. More than one match is a
//! data-integrity error and is surfaced rather than guessed at.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{ScheduleEntry, SchedulePattern, ScheduleResolution};

/// The schedule specificity tiers, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    /// An employee-scoped entry for one exact date.
    DateExact,
    /// An employee-scoped entry for a weekday.
    WeekdayPattern,
    /// An employee-scoped entry with no date restriction.
    EmployeeDefault,
    /// An organisation-wide entry.
    OrgDefault,
}

impl ResolutionTier {
    /// All tiers in resolution order.
    pub const ALL: [ResolutionTier; 4] = [
        ResolutionTier::DateExact,
        ResolutionTier::WeekdayPattern,
        ResolutionTier::EmployeeDefault,
        ResolutionTier::OrgDefault,
    ];
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ResolutionTier::DateExact => "date_exact",
            ResolutionTier::WeekdayPattern => "weekday_pattern",
            ResolutionTier::EmployeeDefault => "employee_default",
            ResolutionTier::OrgDefault => "org_default",
        };
        write!(f, "{}", token)
    }
}

fn entry_matches_tier(
    entry: &ScheduleEntry,
    employee_id: &str,
    date: NaiveDate,
    tier: ResolutionTier,
) -> bool {
    match tier {
        ResolutionTier::DateExact => {
            entry.is_for_employee(employee_id)
                && matches!(entry.pattern, SchedulePattern::Date(d) if d == date)
        }
        ResolutionTier::WeekdayPattern => {
            entry.is_for_employee(employee_id)
                && matches!(entry.pattern, SchedulePattern::Weekday(w) if w == date.weekday())
        }
        ResolutionTier::EmployeeDefault => {
            entry.is_for_employee(employee_id) && entry.pattern == SchedulePattern::Always
        }
        // Org-scoped entries compete in a single tier regardless of their
        // pattern, so an org-wide date entry still ranks below every
        // employee-scoped entry.
        ResolutionTier::OrgDefault => entry.is_org_scoped() && entry.matches_date(date),
    }
}

/// Resolves the schedule governing an employee on a date.
///
/// Walks the tiers in specificity order and stops at the first tier with
/// a matching entry. A matching entry with no window is an explicit day
/// off and resolves to `NoSchedule`, shadowing any less specific entry.
/// No matching entry at any tier also resolves to `NoSchedule`.
///
/// # Arguments
///
/// * `employee_id` - The employee to resolve for
/// * `date` - The calendar date to resolve for
/// * `entries` - The raw, unresolved entries for this employee's org
///
/// # Returns
///
/// The winning resolution, or `ScheduleConflict` when more than one entry
/// matches at the winning tier.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::resolve_schedule;
/// use attendance_engine::models::{ScheduleEntry, SchedulePattern, ScheduleScope, ShiftWindow};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let entries = vec![ScheduleEntry {
///     scope: ScheduleScope::Org,
///     pattern: SchedulePattern::Always,
///     window: Some(ShiftWindow {
///         start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///         end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///         expected_minutes: 480,
///         grace_minutes: 0,
///     }),
/// }];
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let resolution = resolve_schedule("emp_001", date, &entries).unwrap();
/// assert_eq!(resolution.expected_minutes(), 480);
/// ```
pub fn resolve_schedule(
    employee_id: &str,
    date: NaiveDate,
    entries: &[ScheduleEntry],
) -> EngineResult<ScheduleResolution> {
    for tier in ResolutionTier::ALL {
        let mut matched = entries
            .iter()
            .filter(|entry| entry_matches_tier(entry, employee_id, date, tier));

        let Some(winner) = matched.next() else {
            continue;
        };
        if matched.next().is_some() {
            return Err(EngineError::ScheduleConflict {
                employee_id: employee_id.to_string(),
                date,
                tier: tier.to_string(),
            });
        }

        return Ok(winner
            .window
            .clone()
            .map(ScheduleResolution::Scheduled)
            .unwrap_or(ScheduleResolution::NoSchedule));
    }

    Ok(ScheduleResolution::NoSchedule)
}
