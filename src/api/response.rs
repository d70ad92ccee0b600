//! Response types for the attendance engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an invalid path parameter error response.
    pub fn invalid_parameter(name: &str, value: &str) -> Self {
        Self::with_details(
            "INVALID_PARAMETER",
            format!("Invalid value for parameter '{}': {}", name, value),
            format!("The path parameter '{}' could not be interpreted", name),
        )
    }

    /// Creates an employee not found error response.
    pub fn employee_not_found(employee_id: &str) -> Self {
        Self::with_details(
            "EMPLOYEE_NOT_FOUND",
            format!("Employee not found: {}", employee_id),
            "The employee does not exist or is not active for the requested period",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidTimezone { name } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Invalid site timezone: {}", name),
                ),
            },
            EngineError::StoreUnavailable { store, message } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "STORE_UNAVAILABLE",
                    "Data temporarily unavailable",
                    format!("Store '{}' failed: {}", store, message),
                ),
            },
            EngineError::ScheduleConflict {
                employee_id,
                date,
                tier,
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "SCHEDULE_CONFLICT",
                    format!(
                        "Schedule conflict for employee '{}' on {}",
                        employee_id, date
                    ),
                    format!("More than one schedule entry matches the {} tier", tier),
                ),
            },
            EngineError::MalformedPunchSequence {
                employee_id,
                message,
            } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "MALFORMED_PUNCH_SEQUENCE",
                    format!("Punch data for employee '{}' could not be reconciled", employee_id),
                    message,
                ),
            },
            EngineError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::employee_not_found(&employee_id),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_parameter_error() {
        let error = ApiError::invalid_parameter("month", "thirteen");
        assert_eq!(error.code, "INVALID_PARAMETER");
        assert!(error.message.contains("month"));
        assert!(error.message.contains("thirteen"));
    }

    #[test]
    fn test_store_unavailable_maps_to_503() {
        let engine_error = EngineError::StoreUnavailable {
            store: "punch_store".to_string(),
            message: "connection refused".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(api_error.error.code, "STORE_UNAVAILABLE");
        assert_eq!(api_error.error.message, "Data temporarily unavailable");
    }

    #[test]
    fn test_schedule_conflict_maps_to_409() {
        let engine_error = EngineError::ScheduleConflict {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            tier: "org_default".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "SCHEDULE_CONFLICT");
        assert!(api_error.error.details.unwrap().contains("org_default"));
    }

    #[test]
    fn test_malformed_punch_sequence_maps_to_422() {
        let engine_error = EngineError::MalformedPunchSequence {
            employee_id: "emp_001".to_string(),
            message: "clock-out with no preceding clock-in".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "MALFORMED_PUNCH_SEQUENCE");
    }

    #[test]
    fn test_employee_not_found_maps_to_404() {
        let engine_error = EngineError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[test]
    fn test_invalid_timezone_maps_to_500() {
        let engine_error = EngineError::InvalidTimezone {
            name: "Mars/Olympus_Mons".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
