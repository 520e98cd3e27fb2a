//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/natal-chart", post(handlers::natal_chart))
        .route("/transit", post(handlers::transit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::providers::adapters::{EphemerisTable, StaticGeocoder, TabulatedEphemeris};
    use crate::services::{ChartService, ChartSettings};

    #[test]
    fn test_router_creation() {
        let ephemeris = TabulatedEphemeris::new(EphemerisTable {
            start_jd: 2451545.0,
            step_days: 1.0,
            bodies: Default::default(),
        });
        let service = ChartService::new(
            Arc::new(StaticGeocoder::new()),
            Arc::new(ephemeris.unwrap()),
            ChartSettings::default(),
        );
        let _router = create_router(AppState::new(service));
    }
}
