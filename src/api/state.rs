//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::publisher::MetricsPublisher;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// currently the metrics publisher and its range cache.
#[derive(Clone)]
pub struct AppState {
    /// The metrics publisher serving every query.
    publisher: Arc<MetricsPublisher>,
}

impl AppState {
    /// Creates a new application state around the given publisher.
    pub fn new(publisher: MetricsPublisher) -> Self {
        Self {
            publisher: Arc::new(publisher),
        }
    }

    /// Returns a reference to the metrics publisher.
    pub fn publisher(&self) -> &MetricsPublisher {
        &self.publisher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
