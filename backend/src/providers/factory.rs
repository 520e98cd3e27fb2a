//! Provider factory for dependency injection.
//!
//! This module builds ephemeris and geocoding providers from runtime
//! configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::adapters::{AnalyticEphemeris, StaticGeocoder, TabulatedEphemeris};
use super::{EphemerisProvider, GeocodingProvider};
use crate::config::{EphemerisSettings, GeocodingSettings};
use crate::error::{ChartError, ChartResult};

/// Geocoder implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocoderType {
    /// OpenCage HTTP API
    OpenCage,
    /// In-memory gazetteer
    Static,
}

impl FromStr for GeocoderType {
    type Err = String;

    /// Parse geocoder type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("opencage", "static")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opencage" | "open_cage" => Ok(Self::OpenCage),
            "static" | "local" => Ok(Self::Static),
            _ => Err(format!("Unknown geocoder type: {}", s)),
        }
    }
}

impl GeocoderType {
    /// Pick the geocoder for a configuration.
    ///
    /// An explicit `provider` setting wins. Otherwise OpenCage is used when an
    /// API key is available, and the static gazetteer when it is not.
    pub fn resolve(settings: &GeocodingSettings) -> ChartResult<Self> {
        match settings.provider.as_deref() {
            Some(name) => name.parse().map_err(ChartError::configuration),
            None if settings.api_key.is_some() => Ok(Self::OpenCage),
            None => Ok(Self::Static),
        }
    }
}

/// Ephemeris implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EphemerisType {
    /// Built-in analytic series
    Analytic,
    /// Precomputed `ephemeris.json` table
    Tabulated,
}

impl FromStr for EphemerisType {
    type Err = String;

    /// Parse ephemeris type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("analytic", "tabulated")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "analytic" | "builtin" => Ok(Self::Analytic),
            "tabulated" | "table" => Ok(Self::Tabulated),
            _ => Err(format!("Unknown ephemeris type: {}", s)),
        }
    }
}

impl EphemerisType {
    /// Pick the ephemeris for a configuration; analytic unless a provider is named.
    pub fn resolve(settings: &EphemerisSettings) -> ChartResult<Self> {
        match settings.provider.as_deref() {
            Some(name) => name.parse().map_err(ChartError::configuration),
            None => Ok(Self::Analytic),
        }
    }
}

/// Factory for creating provider instances.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the geocoder described by `settings`.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn GeocodingProvider>)` - Shared geocoder
    /// * `Err(ChartError::Configuration)` - Missing key, bad gazetteer or disabled feature
    pub fn create_geocoder(settings: &GeocodingSettings) -> ChartResult<Arc<dyn GeocodingProvider>> {
        match GeocoderType::resolve(settings)? {
            GeocoderType::OpenCage => Self::create_opencage(settings),
            GeocoderType::Static => {
                let geocoder = StaticGeocoder::from_entries(&settings.places)?;
                if geocoder.is_empty() {
                    log::warn!("Static geocoder has no places configured; every lookup will fail");
                }
                Ok(Arc::new(geocoder))
            }
        }
    }

    #[cfg(feature = "opencage")]
    fn create_opencage(settings: &GeocodingSettings) -> ChartResult<Arc<dyn GeocodingProvider>> {
        use super::adapters::OpenCageGeocoder;
        use std::time::Duration;

        let api_key = settings.api_key.clone().ok_or_else(|| {
            ChartError::configuration("OpenCage geocoder requires OPENCAGE_API_KEY or geocoding.api_key")
        })?;
        let geocoder = OpenCageGeocoder::new(
            api_key,
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )?;
        Ok(Arc::new(geocoder))
    }

    #[cfg(not(feature = "opencage"))]
    fn create_opencage(_settings: &GeocodingSettings) -> ChartResult<Arc<dyn GeocodingProvider>> {
        Err(ChartError::configuration("OpenCage geocoder feature not enabled"))
    }

    /// Create the ephemeris described by `settings`.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn EphemerisProvider>)` - Shared ephemeris
    /// * `Err(ChartError::Configuration)` - Unknown provider, or a table that cannot be loaded
    pub fn create_ephemeris(settings: &EphemerisSettings) -> ChartResult<Arc<dyn EphemerisProvider>> {
        match EphemerisType::resolve(settings)? {
            EphemerisType::Analytic => Ok(Arc::new(AnalyticEphemeris::new())),
            EphemerisType::Tabulated => Ok(Arc::new(TabulatedEphemeris::from_dir(&settings.path)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::adapters::PlaceEntry;

    #[test]
    fn test_geocoder_type_from_str() {
        assert_eq!("opencage".parse::<GeocoderType>().unwrap(), GeocoderType::OpenCage);
        assert_eq!("STATIC".parse::<GeocoderType>().unwrap(), GeocoderType::Static);
        assert_eq!("local".parse::<GeocoderType>().unwrap(), GeocoderType::Static);
        assert!("google".parse::<GeocoderType>().is_err());
    }

    #[test]
    fn test_resolve_prefers_explicit_provider() {
        let settings = GeocodingSettings {
            provider: Some("static".into()),
            api_key: Some("key".into()),
            ..Default::default()
        };
        assert_eq!(GeocoderType::resolve(&settings).unwrap(), GeocoderType::Static);
    }

    #[test]
    fn test_resolve_from_api_key() {
        let mut settings = GeocodingSettings::default();
        assert_eq!(GeocoderType::resolve(&settings).unwrap(), GeocoderType::Static);
        settings.api_key = Some("key".into());
        assert_eq!(GeocoderType::resolve(&settings).unwrap(), GeocoderType::OpenCage);
    }

    #[test]
    fn test_resolve_rejects_unknown_provider() {
        let settings = GeocodingSettings {
            provider: Some("carrier-pigeon".into()),
            ..Default::default()
        };
        assert!(matches!(
            GeocoderType::resolve(&settings),
            Err(ChartError::Configuration { .. })
        ));
    }

    #[test]
    fn test_create_static_geocoder() {
        let settings = GeocodingSettings {
            provider: Some("static".into()),
            places: vec![PlaceEntry {
                name: "Ankara".into(),
                latitude: 39.93,
                longitude: 32.85,
                timezone: "Europe/Istanbul".into(),
            }],
            ..Default::default()
        };
        let geocoder = ProviderFactory::create_geocoder(&settings).unwrap();
        assert_eq!(geocoder.name(), "static");
    }

    #[cfg(feature = "opencage")]
    #[test]
    fn test_opencage_requires_key() {
        let settings = GeocodingSettings {
            provider: Some("opencage".into()),
            ..Default::default()
        };
        assert!(ProviderFactory::create_geocoder(&settings).is_err());
    }

    #[test]
    fn test_ephemeris_type_from_str() {
        assert_eq!("analytic".parse::<EphemerisType>().unwrap(), EphemerisType::Analytic);
        assert_eq!("Tabulated".parse::<EphemerisType>().unwrap(), EphemerisType::Tabulated);
        assert!("swiss".parse::<EphemerisType>().is_err());
    }

    #[test]
    fn test_default_ephemeris_needs_no_files() {
        let settings = EphemerisSettings {
            path: "/no/such/ephe".into(),
            ..Default::default()
        };
        assert_eq!(EphemerisType::resolve(&settings).unwrap(), EphemerisType::Analytic);
        let ephemeris = ProviderFactory::create_ephemeris(&settings).unwrap();
        assert_eq!(ephemeris.name(), "analytic");
    }

    #[test]
    fn test_unknown_ephemeris_provider() {
        let settings = EphemerisSettings {
            provider: Some("swiss".into()),
            ..Default::default()
        };
        assert!(matches!(
            ProviderFactory::create_ephemeris(&settings),
            Err(ChartError::Configuration { .. })
        ));
    }

    #[test]
    fn test_missing_ephemeris_directory() {
        let settings = EphemerisSettings {
            provider: Some("tabulated".into()),
            path: "/no/such/ephe".into(),
            ..Default::default()
        };
        assert!(matches!(
            ProviderFactory::create_ephemeris(&settings),
            Err(ChartError::Configuration { .. })
        ));
    }
}
