//! The metrics publisher.
//!
//! This is the engine's read-only facade: it pulls punches and schedule
//! entries from the collaborator stores, runs the reconciliation and
//! aggregation pipeline, and serves the dashboard queries. All queries
//! are idempotent; the only state the publisher owns is a read-through
//! cache of computed ranges.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Days, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::calculation::{
    LeadingOutPolicy, balance_for_days, compute_daily_attendance, local_date_of,
    reconcile_punches, resolve_schedule,
};
use crate::config::EnginePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceStatus, DailyAttendance, DashboardSummary, DateRange, Employee, MonthlyBalance,
    PunchEvent, YearMonth, minutes_as_hours,
};
use crate::store::{ApprovalsProvider, PunchStore, RosterProvider, ScheduleSource};

use super::cache::{AttendanceCache, RangeComputation};

/// Read-only aggregate views over the reconciliation pipeline.
///
/// The publisher performs no writes. Every query recomputes from the
/// collaborator stores, short-circuited by the range cache; store errors
/// propagate to the caller untouched so a failed read is never reported
/// as a zero.
pub struct MetricsPublisher {
    roster: Arc<dyn RosterProvider>,
    punches: Arc<dyn PunchStore>,
    schedules: Arc<dyn ScheduleSource>,
    approvals: Arc<dyn ApprovalsProvider>,
    policy: EnginePolicy,
    site_tz: Tz,
    cache: AttendanceCache,
    fixed_today: Option<NaiveDate>,
}

impl MetricsPublisher {
    /// Creates a publisher over the given collaborators.
    ///
    /// Fails fast when the policy's timezone is not a valid IANA name.
    pub fn new(
        roster: Arc<dyn RosterProvider>,
        punches: Arc<dyn PunchStore>,
        schedules: Arc<dyn ScheduleSource>,
        approvals: Arc<dyn ApprovalsProvider>,
        policy: EnginePolicy,
    ) -> EngineResult<Self> {
        let site_tz = policy.site_timezone()?;
        let cache = AttendanceCache::new(StdDuration::from_secs(policy.cache_staleness_seconds));
        Ok(Self {
            roster,
            punches,
            schedules,
            approvals,
            policy,
            site_tz,
            cache,
            fixed_today: None,
        })
    }

    /// Pins the publisher's notion of "today" to a fixed date.
    ///
    /// Queries normally derive today from the wall clock in the site
    /// timezone. Pinning makes replay and testing deterministic.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// The current site-local date.
    pub fn today_local(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| local_date_of(self.site_tz, Utc::now()))
    }

    /// Number of active employees with at least one work interval today.
    pub async fn present_today(&self) -> EngineResult<u32> {
        let employees = self.roster.list_active_employees().await?;
        let (present, _) = self.presence_counts(&employees, self.today_local()).await?;
        Ok(present)
    }

    /// Number of active employees scheduled today with no punches at all.
    pub async fn absent_today(&self) -> EngineResult<u32> {
        let employees = self.roster.list_active_employees().await?;
        let (_, absent) = self.presence_counts(&employees, self.today_local()).await?;
        Ok(absent)
    }

    /// Total overtime minutes accumulated by active employees this month,
    /// over closed days only.
    pub async fn month_to_date_overtime(&self) -> EngineResult<i64> {
        let employees = self.roster.list_active_employees().await?;
        let (overtime, _) = self.month_to_date_totals(&employees).await?;
        Ok(overtime)
    }

    /// Total deficit minutes accumulated by active employees this month,
    /// over closed days only.
    pub async fn month_to_date_deficit(&self) -> EngineResult<i64> {
        let employees = self.roster.list_active_employees().await?;
        let (_, deficit) = self.month_to_date_totals(&employees).await?;
        Ok(deficit)
    }

    /// Number of requests awaiting approval, passed through verbatim.
    pub async fn pending_approvals(&self) -> EngineResult<u32> {
        self.approvals.pending_count().await
    }

    /// The monthly balance for one employee.
    ///
    /// For the current month only closed days are folded; a future month
    /// yields an empty balance. Returns `EmployeeNotFound` when the
    /// employee is not active in the period.
    pub async fn monthly_balance(
        &self,
        employee_id: &str,
        period: YearMonth,
    ) -> EngineResult<MonthlyBalance> {
        if !self.roster.active_as_of(employee_id, period.last_day()).await? {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }
        self.month_to_date_for(employee_id, period).await
    }

    /// The attendance fact for one employee on one date.
    ///
    /// Returns `EmployeeNotFound` when the employee is not active on the
    /// date.
    pub async fn daily_attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<DailyAttendance> {
        if !self.roster.active_as_of(employee_id, date).await? {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }
        let computation = self
            .computation_for_range(employee_id, DateRange::single(date))
            .await?;
        Ok(computation
            .days
            .into_iter()
            .next()
            .expect("single-date range yields one attendance day"))
    }

    /// The full dashboard summary in one call.
    pub async fn dashboard_summary(&self) -> EngineResult<DashboardSummary> {
        let today = self.today_local();
        let employees = self.roster.list_active_employees().await?;
        let (present, absent) = self.presence_counts(&employees, today).await?;
        let (overtime, deficit) = self.month_to_date_totals(&employees).await?;
        let pending = self.approvals.pending_count().await?;

        Ok(DashboardSummary {
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            active_employees: employees.len() as u32,
            present_today: present,
            absent_today: absent,
            pending_approvals: pending,
            month_to_date_overtime_minutes: overtime,
            month_to_date_deficit_minutes: deficit,
            month_to_date_overtime_hours: minutes_as_hours(overtime),
            month_to_date_deficit_hours: minutes_as_hours(deficit),
        })
    }

    /// Drops every cached range for the employee after a new punch.
    pub async fn on_punch_recorded(&self, employee_id: &str) {
        self.cache.invalidate_employee(employee_id).await;
        info!(employee_id = %employee_id, "Cache invalidated after new punch");
    }

    /// The reconciled intervals and attendance days for one employee over
    /// a date range, served through the cache.
    pub async fn computation_for_range(
        &self,
        employee_id: &str,
        range: DateRange,
    ) -> EngineResult<RangeComputation> {
        if range.is_empty() {
            return Ok(RangeComputation {
                intervals: Vec::new(),
                days: Vec::new(),
            });
        }

        if let Some(hit) = self.cache.lookup(employee_id, &range).await {
            debug!(employee_id = %employee_id, "Range computation served from cache");
            return Ok(hit);
        }

        let computation = self.compute_range(employee_id, range).await?;
        self.cache
            .insert(employee_id, range, computation.clone())
            .await;
        Ok(computation)
    }

    async fn compute_range(
        &self,
        employee_id: &str,
        range: DateRange,
    ) -> EngineResult<RangeComputation> {
        let today = self.today_local();
        let lookback = u64::from(self.policy.lookback_days);

        let punches = self.fetch_punches(employee_id, range, lookback).await?;
        let reconciliation = match reconcile_punches(
            employee_id,
            &punches,
            self.site_tz,
            today,
            &self.policy,
            LeadingOutPolicy::Reject,
        ) {
            Ok(result) => result,
            Err(EngineError::MalformedPunchSequence { message, .. }) => {
                // The matching clock-in may sit just before the fetched
                // window. Widen once, then clamp rather than fail.
                warn!(
                    employee_id = %employee_id,
                    error = %message,
                    "Leading clock-out; widening lookback and retrying with clamp"
                );
                let widened = self.fetch_punches(employee_id, range, lookback * 2).await?;
                reconcile_punches(
                    employee_id,
                    &widened,
                    self.site_tz,
                    today,
                    &self.policy,
                    LeadingOutPolicy::ClampToMidnight,
                )?
            }
            Err(other) => return Err(other),
        };

        for warning in &reconciliation.warnings {
            warn!(
                employee_id = %employee_id,
                code = %warning.code,
                severity = %warning.severity,
                "{}",
                warning.message
            );
        }

        let entries = self.schedules.entries_for(employee_id).await?;
        let mut days = Vec::with_capacity(range.days().count());
        for date in range.days() {
            let resolution = resolve_schedule(employee_id, date, &entries)?;
            days.push(compute_daily_attendance(
                employee_id,
                date,
                &reconciliation.intervals,
                &resolution,
                &self.policy,
                today,
            ));
        }

        let intervals = reconciliation
            .intervals
            .into_iter()
            .filter(|interval| range.contains_date(interval.date))
            .collect();

        Ok(RangeComputation { intervals, days })
    }

    /// Fetches punches for the range, padded on both sides.
    ///
    /// The punch store filters by UTC day while intervals are attributed
    /// to site-local days, and an overnight interval's closing punch can
    /// land on the next day. The padding pulls both in; pairing and the
    /// final per-date filter discard what the range does not need. The
    /// padding saturates at the calendar bounds.
    async fn fetch_punches(
        &self,
        employee_id: &str,
        range: DateRange,
        lookback_days: u64,
    ) -> EngineResult<Vec<PunchEvent>> {
        let padded = DateRange::new(
            range
                .start_date
                .checked_sub_days(Days::new(lookback_days))
                .unwrap_or(NaiveDate::MIN),
            range
                .end_date
                .checked_add_days(Days::new(1))
                .unwrap_or(NaiveDate::MAX),
        );
        self.punches.punches_for(employee_id, &padded).await
    }

    /// Counts presence for one date across the given employees.
    ///
    /// Present means at least one interval attributed to the date, open
    /// ones included; an employee mid-shift has not finished a day, but
    /// they are here. Absent means a scheduled day with no intervals.
    async fn presence_counts(
        &self,
        employees: &[Employee],
        date: NaiveDate,
    ) -> EngineResult<(u32, u32)> {
        let mut present = 0;
        let mut absent = 0;
        for employee in employees {
            let computation = self
                .computation_for_range(&employee.id, DateRange::single(date))
                .await?;
            let has_interval = computation
                .intervals
                .iter()
                .any(|interval| interval.date == date);
            if has_interval {
                present += 1;
            } else if computation
                .days
                .iter()
                .any(|day| day.status == AttendanceStatus::Absent)
            {
                absent += 1;
            }
        }
        Ok((present, absent))
    }

    async fn month_to_date_totals(&self, employees: &[Employee]) -> EngineResult<(i64, i64)> {
        let period = YearMonth::from_date(self.today_local());
        let mut overtime = 0;
        let mut deficit = 0;
        for employee in employees {
            let balance = self.month_to_date_for(&employee.id, period).await?;
            overtime += balance.overtime_minutes;
            deficit += balance.deficit_minutes;
        }
        Ok((overtime, deficit))
    }

    async fn month_to_date_for(
        &self,
        employee_id: &str,
        period: YearMonth,
    ) -> EngineResult<MonthlyBalance> {
        let range = self.closed_range(period);
        let computation = self.computation_for_range(employee_id, range).await?;
        Ok(balance_for_days(employee_id, period, &computation.days))
    }

    /// The closed days of a month: every day strictly before today.
    ///
    /// A past month yields the whole month, the current month everything
    /// through yesterday, and a future month an empty range. Today is
    /// never folded into a balance because its day is still accumulating.
    fn closed_range(&self, period: YearMonth) -> DateRange {
        let yesterday = self.today_local() - Duration::days(1);
        DateRange::new(period.first_day(), period.last_day().min(yesterday))
    }
}
