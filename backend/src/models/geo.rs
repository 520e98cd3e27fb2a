//! Geographic coordinates and geocoder results.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> ChartResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ChartError::geocoding(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ChartError::geocoding(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// What a geocoder resolves a location string to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub coordinate: GeoCoordinate,
    /// IANA timezone name, e.g. `Europe/Istanbul`.
    pub timezone: String,
    /// Canonical place name, when the geocoder provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}
