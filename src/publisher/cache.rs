//! Read-through cache for range computations.
//!
//! Reconciling a month of punches for every dashboard refresh would hammer
//! the punch store, so computed ranges are cached per (employee, range)
//! key with a staleness window and explicit invalidation when new punches
//! arrive.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::models::{DailyAttendance, DateRange, WorkInterval};

/// The computed outcome for one employee over one date range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeComputation {
    /// Reconciled intervals attributed to days inside the range.
    pub intervals: Vec<WorkInterval>,
    /// One attendance fact per day of the range.
    pub days: Vec<DailyAttendance>,
}

#[derive(Debug)]
struct CacheEntry {
    computed_at: Instant,
    computation: RangeComputation,
}

/// Process-wide cache keyed by (employee, date range).
///
/// Entries expire after the configured staleness window. Discarding an
/// entry is always safe; the next read recomputes it.
#[derive(Debug)]
pub struct AttendanceCache {
    staleness: Duration,
    entries: RwLock<HashMap<(String, DateRange), CacheEntry>>,
}

impl AttendanceCache {
    /// Creates a cache whose entries expire after `staleness`.
    pub fn new(staleness: Duration) -> Self {
        Self {
            staleness,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached computation for the key, if fresh.
    pub async fn lookup(&self, employee_id: &str, range: &DateRange) -> Option<RangeComputation> {
        let entries = self.entries.read().await;
        entries
            .get(&(employee_id.to_string(), *range))
            .and_then(|entry| {
                (entry.computed_at.elapsed() < self.staleness)
                    .then(|| entry.computation.clone())
            })
    }

    /// Stores a computation under the key.
    pub async fn insert(
        &self,
        employee_id: &str,
        range: DateRange,
        computation: RangeComputation,
    ) {
        self.entries.write().await.insert(
            (employee_id.to_string(), range),
            CacheEntry {
                computed_at: Instant::now(),
                computation,
            },
        );
    }

    /// Discards every cached range for one employee.
    pub async fn invalidate_employee(&self, employee_id: &str) {
        self.entries
            .write()
            .await
            .retain(|(id, _), _| id != employee_id);
    }

    /// Returns the number of cached entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
