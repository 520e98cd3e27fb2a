//! Provider boundary for ephemeris and geocoding.
//!
//! The chart engine never talks to an ephemeris or a geocoding service
//! directly. It goes through the traits defined here, so the core can run
//! against deterministic fakes in tests and against real services in
//! production.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Services (ChartService, PositionResolver)              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Traits: EphemerisProvider, GeocodingProvider           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┬──────────────────┐
//!     │ AnalyticEphemeris            │ OpenCageGeocoder │
//!     │ TabulatedEphemeris           │ StaticGeocoder   │
//!     │ (+ shared house division)    │                  │
//!     └──────────────────────────────┴──────────────────┘
//! ```
//!
//! - `ephemeris` / `geocoding`: trait definitions
//! - `adapters`: implementations
//! - `factory`: builds providers from configuration

pub mod adapters;
pub mod ephemeris;
pub mod factory;
pub mod geocoding;

pub use ephemeris::{EphemerisProvider, HouseCusps, HouseSystem};
pub use factory::{EphemerisType, GeocoderType, ProviderFactory};
pub use geocoding::GeocodingProvider;
