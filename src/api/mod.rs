//! HTTP API module for the attendance and time-balance engine.
//!
//! This module provides the REST endpoints the dashboard consumes: the
//! aggregate metrics summary plus per-employee balance and attendance
//! drill-downs.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::ApiError;
pub use state::AppState;
