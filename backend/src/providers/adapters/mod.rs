//! Provider implementations module.
//!
//! This module contains the concrete implementations of the provider traits:
//! - `analytic`: built-in ephemeris from analytic series (the default)
//! - `tabulated`: file-backed ephemeris with interpolation
//! - `houses`: chart angles and house division shared by both ephemerides
//! - `local`: in-memory gazetteer for offline use and tests
//! - `opencage`: OpenCage HTTP geocoder
pub mod analytic;
pub mod houses;
pub mod local;
#[cfg(feature = "opencage")]
pub mod opencage;
pub mod tabulated;

pub use analytic::AnalyticEphemeris;
pub use local::{PlaceEntry, StaticGeocoder};
#[cfg(feature = "opencage")]
pub use opencage::{OpenCageGeocoder, DEFAULT_OPENCAGE_URL};
pub use tabulated::{EphemerisTable, TabulatedEphemeris, EPHEMERIS_FILE_NAME};
