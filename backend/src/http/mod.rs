//! HTTP server module for the chart backend.
//!
//! This module provides an axum-based HTTP server that exposes the chart
//! services as a small JSON API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - ChartService: natal and transit orchestration          │
//! │  - PositionResolver / AspectDetector                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Provider Layer (providers/)                              │
//! │  - GeocodingProvider (OpenCage / static gazetteer)        │
//! │  - EphemerisProvider (tabulated longitudes + houses)      │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
