//! Employee model.
//!
//! This module defines the Employee struct used to represent workers in the
//! attendance system. Employee records are owned by the HR subsystem; the
//! engine treats them as a read-only roster.

use serde::{Deserialize, Serialize};

/// Represents an employee whose punches are tracked by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Human-readable name shown on dashboards.
    pub display_name: String,
    /// Whether the employee is currently active. Inactive employees are
    /// excluded from fleet-wide metrics.
    pub active: bool,
    /// Optional reference to the schedule assigned to this employee
    /// (e.g., "weekday_standard").
    #[serde(default)]
    pub schedule_ref: Option<String>,
}

impl Employee {
    /// Returns true if the employee should be counted in fleet-wide metrics.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     display_name: "Ana Souza".to_string(),
    ///     active: true,
    ///     schedule_ref: None,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.active
    }
}
