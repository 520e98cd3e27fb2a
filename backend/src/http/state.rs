//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::ChartService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chart service holding the shared providers
    pub chart_service: Arc<ChartService>,
}

impl AppState {
    /// Create a new application state around a chart service.
    pub fn new(chart_service: ChartService) -> Self {
        Self {
            chart_service: Arc::new(chart_service),
        }
    }
}
