//! Astro Chart HTTP Server Binary
//!
//! This is the main entry point for the chart REST API server.
//! It loads configuration, builds the providers, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Static gazetteer from chart.toml, built-in analytic ephemeris
//! cargo run --bin astro-chart-server
//!
//! # OpenCage geocoding, precomputed ephemeris table
//! OPENCAGE_API_KEY=... EPHEMERIS_TYPE=tabulated EPHE_PATH=/srv/ephe cargo run --bin astro-chart-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5000)
//! - `EPHEMERIS_TYPE`: `analytic` (default) or `tabulated`
//! - `EPHE_PATH`: Directory holding `ephemeris.json` (default: ./ephe)
//! - `OPENCAGE_API_KEY`: Enables the OpenCage geocoder
//! - `GEOCODER_TYPE`: Force `opencage` or `static`
//! - `CHART_CONFIG`: Path to a `chart.toml`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use astro_chart::config::ChartConfig;
use astro_chart::http::{create_router, AppState};
use astro_chart::providers::ProviderFactory;
use astro_chart::services::ChartService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting astro chart HTTP server");

    let config = ChartConfig::load()?;

    let geocoder = ProviderFactory::create_geocoder(&config.geocoding)?;
    let ephemeris = ProviderFactory::create_ephemeris(&config.ephemeris)?;
    info!(
        geocoder = geocoder.name(),
        ephemeris = ephemeris.name(),
        house_system = %config.ephemeris.house_system,
        "Providers initialized"
    );

    let service = ChartService::new(geocoder, ephemeris, config.chart_settings());
    let app = create_router(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
