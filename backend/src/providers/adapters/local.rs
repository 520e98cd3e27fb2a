//! In-memory geocoder.
//!
//! Serves a fixed gazetteer, loaded from configuration. Useful for offline
//! deployments, local development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::models::time::parse_timezone;
use crate::models::{GeoCoordinate, GeoLocation};
use crate::providers::geocoding::GeocodingProvider;

/// One gazetteer entry as written in `chart.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntry {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// Geocoder backed by a fixed name → location table.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, GeoLocation>,
}

fn place_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration entries, validating each one.
    pub fn from_entries(entries: &[PlaceEntry]) -> ChartResult<Self> {
        let mut geocoder = Self::new();
        for entry in entries {
            let coordinate = GeoCoordinate::new(entry.latitude, entry.longitude).map_err(|e| {
                ChartError::configuration(format!("place '{}': {}", entry.name, e))
            })?;
            if parse_timezone(&entry.timezone).is_err() {
                return Err(ChartError::configuration(format!(
                    "place '{}': unknown timezone {}",
                    entry.name, entry.timezone
                )));
            }
            geocoder = geocoder.with_place(
                &entry.name,
                GeoLocation {
                    coordinate,
                    timezone: entry.timezone.clone(),
                    formatted: Some(entry.name.clone()),
                },
            );
        }
        Ok(geocoder)
    }

    /// Add or replace a place. Matching ignores case and surrounding whitespace.
    pub fn with_place(mut self, name: &str, location: GeoLocation) -> Self {
        self.places.insert(place_key(name), location);
        self
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[async_trait]
impl GeocodingProvider for StaticGeocoder {
    async fn lookup(&self, location: &str) -> ChartResult<GeoLocation> {
        self.places
            .get(&place_key(location))
            .cloned()
            .ok_or_else(|| ChartError::LocationNotFound {
                location: location.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
