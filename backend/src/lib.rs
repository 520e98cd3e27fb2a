//! # Astro Chart Backend
//!
//! Natal and transit chart engine.
//!
//! Given a birth time and place, the crate resolves the place to coordinates
//! and a timezone, converts the local birth time to a Julian Day instant, and
//! reports which zodiac sign each tracked body occupies. For transits it also
//! compares the bodies at a second instant against the natal positions and
//! lists the major aspects between them.
//!
//! ## Architecture
//!
//! - [`models`]: Instants, signs, bodies, aspects and coordinates
//! - [`providers`]: Ephemeris and geocoding boundaries with their adapters
//! - [`services`]: Position resolution, aspect detection and chart orchestration
//! - [`config`]: `chart.toml` and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!

pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ChartError, ChartResult};
