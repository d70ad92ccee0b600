//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::YearMonth;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics/summary", get(summary_handler))
        .route(
            "/employees/:employee_id/balance/:year/:month",
            get(balance_handler),
        )
        .route(
            "/employees/:employee_id/attendance/:date",
            get(attendance_handler),
        )
        .with_state(state)
}

/// Handler for GET /metrics/summary.
///
/// Returns the aggregate dashboard view: presence counts for today,
/// month-to-date overtime and deficit, and the pending approval count.
async fn summary_handler(State(state): State<AppState>) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing dashboard summary request");

    let start_time = Instant::now();
    match state.publisher().dashboard_summary().await {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                active_employees = summary.active_employees,
                present_today = summary.present_today,
                duration_us = start_time.elapsed().as_micros(),
                "Summary computed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(summary),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Summary computation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /employees/:employee_id/balance/:year/:month.
///
/// Returns the monthly overtime/deficit balance for one employee. For
/// the current month only closed days are included.
async fn balance_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): Path<(String, String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing monthly balance request"
    );

    let Ok(year) = year.parse::<i32>() else {
        return invalid_parameter_response(correlation_id, "year", &year);
    };
    let Ok(month_number) = month.parse::<u32>() else {
        return invalid_parameter_response(correlation_id, "month", &month);
    };
    let Some(period) = YearMonth::new(year, month_number) else {
        return invalid_parameter_response(correlation_id, "month", &month);
    };

    let start_time = Instant::now();
    match state.publisher().monthly_balance(&employee_id, period).await {
        Ok(balance) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                period = %period,
                net_minutes = balance.net_minutes(),
                duration_us = start_time.elapsed().as_micros(),
                "Balance computed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(balance),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Balance computation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /employees/:employee_id/attendance/:date.
///
/// Returns the attendance fact for one employee on one date, including
/// any data-quality warnings raised while deriving it.
async fn attendance_handler(
    State(state): State<AppState>,
    Path((employee_id, date)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing daily attendance request"
    );

    let Ok(date) = date.parse::<NaiveDate>() else {
        return invalid_parameter_response(correlation_id, "date", &date);
    };

    let start_time = Instant::now();
    match state.publisher().daily_attendance(&employee_id, date).await {
        Ok(day) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                date = %date,
                status = %day.status,
                duration_us = start_time.elapsed().as_micros(),
                "Attendance computed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(day),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Attendance computation failed"
            );
            error_response(err.into())
        }
    }
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn invalid_parameter_response(correlation_id: Uuid, name: &str, value: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        parameter = %name,
        value = %value,
        "Invalid path parameter"
    );
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiError::invalid_parameter(name, value)),
    )
        .into_response()
}
