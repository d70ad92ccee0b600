//! Calculation logic for the attendance and time-balance engine.
//!
//! This module contains the pure computation pipeline: punch stream
//! normalization and deduplication, pairing punches into work intervals,
//! day-boundary attribution across the site-local midnight, schedule
//! resolution across specificity tiers, daily attendance derivation, and
//! the monthly balance fold.

mod daily_attendance;
mod day_boundary;
mod interval_pairing;
mod monthly_balance;
mod punch_order;
mod schedule_resolution;

pub use daily_attendance::compute_daily_attendance;
pub use day_boundary::{apply_midnight_policy, local_date_of, local_midnight, split_at_local_midnights};
pub use interval_pairing::{
    LeadingOutPolicy, ReconciliationResult, pair_punches, reconcile_punches,
};
pub use monthly_balance::{balance_for_days, fold_monthly_balance};
pub use punch_order::{PunchNormalization, normalize_punches};
pub use schedule_resolution::{ResolutionTier, resolve_schedule};
