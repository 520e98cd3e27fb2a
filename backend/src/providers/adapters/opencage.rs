//! OpenCage geocoding client.
//!
//! Queries the OpenCage forward-geocoding endpoint and takes the first
//! result's geometry and timezone annotation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ChartError, ChartResult};
use crate::models::{GeoCoordinate, GeoLocation};
use crate::providers::geocoding::GeocodingProvider;

/// Public OpenCage endpoint.
pub const DEFAULT_OPENCAGE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageResponse {
    #[serde(default)]
    pub results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageResult {
    pub geometry: OpenCageGeometry,
    #[serde(default)]
    pub annotations: Option<OpenCageAnnotations>,
    #[serde(default)]
    pub formatted: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageGeometry {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageAnnotations {
    #[serde(default)]
    pub timezone: Option<OpenCageTimezone>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenCageTimezone {
    pub name: String,
}

/// Turn a decoded OpenCage response into a location.
pub(crate) fn location_from_response(
    query: &str,
    response: OpenCageResponse,
) -> ChartResult<GeoLocation> {
    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| ChartError::LocationNotFound {
            location: query.to_string(),
        })?;

    let timezone = first
        .annotations
        .and_then(|a| a.timezone)
        .map(|tz| tz.name)
        .ok_or_else(|| {
            ChartError::geocoding(format!("no timezone annotation for '{}'", query))
        })?;

    Ok(GeoLocation {
        coordinate: GeoCoordinate::new(first.geometry.lat, first.geometry.lng)?,
        timezone,
        formatted: first.formatted,
    })
}

/// Geocoder calling the OpenCage HTTP API.
#[derive(Debug, Clone)]
pub struct OpenCageGeocoder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenCageGeocoder {
    /// Create a client.
    ///
    /// # Arguments
    /// * `api_key` - OpenCage API key
    /// * `base_url` - Endpoint URL, normally [`DEFAULT_OPENCAGE_URL`]
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ChartResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ChartError::configuration("OpenCage API key is empty"));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChartError::configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl GeocodingProvider for OpenCageGeocoder {
    async fn lookup(&self, location: &str) -> ChartResult<GeoLocation> {
        log::debug!("OpenCage lookup for '{}'", location);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", location), ("key", self.api_key.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(ChartError::geocoding)?
            .error_for_status()
            .map_err(ChartError::geocoding)?;

        let body: OpenCageResponse = response.json().await.map_err(ChartError::geocoding)?;
        let resolved = location_from_response(location, body)?;
        log::debug!(
            "OpenCage resolved '{}' to ({}, {}) in {}",
            location,
            resolved.coordinate.latitude,
            resolved.coordinate.longitude,
            resolved.timezone
        );
        Ok(resolved)
    }

    fn name(&self) -> &'static str {
        "opencage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> OpenCageResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_result_is_used() {
        let body = decode(
            r#"{
                "results": [
                    {
                        "formatted": "Istanbul, Turkey",
                        "geometry": {"lat": 41.0082, "lng": 28.9784},
                        "annotations": {"timezone": {"name": "Europe/Istanbul", "offset_sec": 10800}}
                    },
                    {
                        "geometry": {"lat": 0.0, "lng": 0.0},
                        "annotations": {"timezone": {"name": "UTC"}}
                    }
                ],
                "status": {"code": 200, "message": "OK"}
            }"#,
        );
        let loc = location_from_response("istanbul", body).unwrap();
        assert_eq!(loc.timezone, "Europe/Istanbul");
        assert_eq!(loc.coordinate.longitude, 28.9784);
        assert_eq!(loc.formatted.as_deref(), Some("Istanbul, Turkey"));
    }

    #[test]
    fn test_no_results_is_not_found() {
        let body = decode(r#"{"results": [], "total_results": 0}"#);
        let err = location_from_response("Nowhere", body).unwrap_err();
        assert_eq!(
            err,
            ChartError::LocationNotFound {
                location: "Nowhere".into()
            }
        );
    }

    #[test]
    fn test_missing_timezone_annotation() {
        let body = decode(r#"{"results": [{"geometry": {"lat": 1.0, "lng": 2.0}}]}"#);
        let err = location_from_response("x", body).unwrap_err();
        assert!(matches!(err, ChartError::Geocoding { .. }));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = OpenCageGeocoder::new("  ", DEFAULT_OPENCAGE_URL, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ChartError::Configuration { .. }));
    }
}
