//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! chart service for the computation.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::dto::{
    HealthResponse, NatalChartRequest, NatalChartResponse, TransitRequest, TransitResponse,
};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports the service version and the providers it was started with.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ephemeris: state.chart_service.ephemeris_name().to_string(),
        geocoder: state.chart_service.geocoder_name().to_string(),
    }))
}

// =============================================================================
// Charts
// =============================================================================

/// POST /natal-chart
///
/// Sign placement of every tracked body at the birth moment.
pub async fn natal_chart(
    State(state): State<AppState>,
    payload: Result<Json<NatalChartRequest>, JsonRejection>,
) -> HandlerResult<NatalChartResponse> {
    let Json(request) = payload?;
    let service = &state.chart_service;
    let chart = service.natal_chart(request).await?;

    tracing::info!(
        timezone = %chart.timezone,
        instant = chart.instant.value(),
        "natal chart computed"
    );
    Ok(Json(NatalChartResponse::from_chart(&chart, service.locale())))
}

/// POST /transit
///
/// Transit placements at `target_date` and their aspects to the natal chart.
pub async fn transit(
    State(state): State<AppState>,
    payload: Result<Json<TransitRequest>, JsonRejection>,
) -> HandlerResult<TransitResponse> {
    let Json(request) = payload?;
    let service = &state.chart_service;
    let chart = service.transit_chart(request).await?;

    tracing::info!(
        timezone = %chart.timezone,
        aspects = chart.aspects.len(),
        "transit chart computed"
    );
    Ok(Json(TransitResponse::from_chart(&chart, service.locale())))
}
