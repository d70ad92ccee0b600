//! Collaborator interfaces.
//!
//! The engine reads from four externally owned collaborators: the
//! employee roster, the append-only punch event store, the raw schedule
//! configuration, and the approvals workflow. Each is a narrow trait so
//! the engine depends on interfaces it can be handed, never on a
//! particular backing store. Implementations own their retry behavior;
//! the engine surfaces their errors untouched.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{DateRange, Employee, PunchEvent, ScheduleEntry};

/// Read access to the employee roster.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Lists every employee currently marked active.
    async fn list_active_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns true if the employee exists and is active as of the date.
    async fn active_as_of(&self, employee_id: &str, date: NaiveDate) -> EngineResult<bool>;
}

/// Read access to the append-only punch event store.
#[async_trait]
pub trait PunchStore: Send + Sync {
    /// Returns the punches whose punch instant falls on a UTC day inside
    /// the range, ordered by punch instant.
    ///
    /// Sub-instant ordering is unspecified, so callers still normalize
    /// the stream before pairing. The store never returns punches outside
    /// the requested range, so callers pad the range when an interval may
    /// cross into a neighbouring day.
    async fn punches_for(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<PunchEvent>>;
}

/// Read access to raw, unresolved schedule configuration.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Returns every entry that could govern this employee: their own
    /// entries plus the org-wide ones. Resolution is the engine's job.
    async fn entries_for(&self, employee_id: &str) -> EngineResult<Vec<ScheduleEntry>>;
}

/// Read access to the approvals workflow.
#[async_trait]
pub trait ApprovalsProvider: Send + Sync {
    /// Returns the number of requests awaiting approval.
    async fn pending_count(&self) -> EngineResult<u32>;
}
