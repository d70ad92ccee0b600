//! The metrics publisher and its range cache.

mod cache;
mod service;

pub use cache::{AttendanceCache, RangeComputation};
pub use service::MetricsPublisher;
