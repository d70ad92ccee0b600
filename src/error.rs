//! Error types for the attendance and time-balance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during punch reconciliation and
//! metric aggregation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The configured site timezone is not a valid IANA timezone name.
    #[error("Invalid timezone: {name}")]
    InvalidTimezone {
        /// The timezone name that failed to parse.
        name: String,
    },

    /// A backing store could not serve a read.
    #[error("Store '{store}' unavailable: {message}")]
    StoreUnavailable {
        /// The name of the store that failed.
        store: String,
        /// A description of the failure.
        message: String,
    },

    /// More than one schedule entry matched at the same resolution tier.
    #[error("Schedule conflict for employee '{employee_id}' on {date}: multiple entries match the {tier} tier")]
    ScheduleConflict {
        /// The employee whose schedule was being resolved.
        employee_id: String,
        /// The date for which resolution was attempted.
        date: NaiveDate,
        /// The resolution tier where the ambiguity was found.
        tier: String,
    },

    /// A punch stream could not be reconciled into intervals.
    #[error("Malformed punch sequence for employee '{employee_id}': {message}")]
    MalformedPunchSequence {
        /// The employee whose punches were being reconciled.
        employee_id: String,
        /// A description of what made the sequence malformed.
        message: String,
    },

    /// The requested employee does not exist or is not active for the
    /// requested period.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee identifier that was requested.
        employee_id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
