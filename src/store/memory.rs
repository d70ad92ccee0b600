//! In-memory collaborator implementations.
//!
//! These back the engine in tests and single-process deployments. Shared
//! state sits behind `tokio::sync::RwLock` so concurrent read-only
//! queries never contend with each other.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::error::EngineResult;
use crate::models::{DateRange, Employee, PunchEvent, ScheduleEntry};

use super::traits::{ApprovalsProvider, PunchStore, RosterProvider, ScheduleSource};

/// In-memory employee roster.
///
/// Keeps no history, so the active flag applies to every date.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee to the roster.
    pub async fn insert(&self, employee: Employee) {
        self.employees.write().await.push(employee);
    }
}

#[async_trait]
impl RosterProvider for InMemoryRoster {
    async fn list_active_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self
            .employees
            .read()
            .await
            .iter()
            .filter(|employee| employee.active)
            .cloned()
            .collect())
    }

    async fn active_as_of(&self, employee_id: &str, _date: NaiveDate) -> EngineResult<bool> {
        Ok(self
            .employees
            .read()
            .await
            .iter()
            .any(|employee| employee.id == employee_id && employee.active))
    }
}

/// In-memory punch event store, keyed by employee.
#[derive(Debug, Default)]
pub struct InMemoryPunchStore {
    punches: RwLock<HashMap<String, Vec<PunchEvent>>>,
}

impl InMemoryPunchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a punch event.
    pub async fn record(&self, punch: PunchEvent) {
        self.punches
            .write()
            .await
            .entry(punch.employee_id.clone())
            .or_default()
            .push(punch);
    }
}

#[async_trait]
impl PunchStore for InMemoryPunchStore {
    async fn punches_for(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<PunchEvent>> {
        let punches = self.punches.read().await;
        let mut events: Vec<PunchEvent> = punches
            .get(employee_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|punch| range.contains_date(punch.punched_at.date_naive()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        events.sort_by_key(|punch| punch.punched_at);
        Ok(events)
    }
}

/// In-memory schedule configuration.
#[derive(Debug, Default)]
pub struct InMemoryScheduleSource {
    entries: RwLock<Vec<ScheduleEntry>>,
}

impl InMemoryScheduleSource {
    /// Creates an empty schedule source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a schedule entry.
    pub async fn insert(&self, entry: ScheduleEntry) {
        self.entries.write().await.push(entry);
    }
}

#[async_trait]
impl ScheduleSource for InMemoryScheduleSource {
    async fn entries_for(&self, employee_id: &str) -> EngineResult<Vec<ScheduleEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|entry| entry.is_org_scoped() || entry.is_for_employee(employee_id))
            .cloned()
            .collect())
    }
}

/// In-memory approvals counter.
#[derive(Debug, Default)]
pub struct InMemoryApprovals {
    pending: AtomicU32,
}

impl InMemoryApprovals {
    /// Creates a counter with no pending approvals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of pending approvals.
    pub fn set_pending(&self, count: u32) {
        self.pending.store(count, Ordering::Relaxed);
    }
}

#[async_trait]
impl ApprovalsProvider for InMemoryApprovals {
    async fn pending_count(&self) -> EngineResult<u32> {
        Ok(self.pending.load(Ordering::Relaxed))
    }
}
