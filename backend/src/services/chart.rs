//! Natal and transit chart orchestration.
//!
//! `ChartService` owns the shared providers and the immutable chart tables.
//! Each call validates its input, geocodes the location once, converts local
//! times to instants, and hands those to the position and aspect services.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::aspects::AspectDetector;
use super::positions::PositionResolver;
use crate::error::{ChartError, ChartResult};
use crate::models::time;
use crate::models::{Aspect, AspectTable, Body, GeoLocation, JulianDay, SignLocale, SignPlacement};
use crate::providers::{EphemerisProvider, GeocodingProvider, HouseCusps, HouseSystem};

/// Immutable tables a chart is computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    /// Tracked bodies in output order.
    pub bodies: Vec<Body>,
    pub aspects: AspectTable,
    pub locale: SignLocale,
    pub house_system: HouseSystem,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            bodies: Body::ALL.to_vec(),
            aspects: AspectTable::default(),
            locale: SignLocale::default(),
            house_system: HouseSystem::default(),
        }
    }
}

/// Birth data for a natal chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NatalChartInput {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM`.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Free-text place name.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub include_houses: bool,
}

/// Birth data plus the moment to compare against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitInput {
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Local wall-clock time at the birth location, `YYYY-MM-DD HH:MM`.
    #[serde(default)]
    pub target_date: Option<String>,
}

/// Computed natal chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalChart {
    pub planets: BTreeMap<Body, SignPlacement>,
    /// IANA timezone the birth time was interpreted in.
    pub timezone: String,
    pub houses: Option<HouseCusps>,
    pub instant: JulianDay,
    pub location: GeoLocation,
}

/// Computed transit chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitChart {
    pub transits: BTreeMap<Body, SignPlacement>,
    pub aspects: Vec<Aspect>,
    pub timezone: String,
}

/// Chart computation service.
#[derive(Clone)]
pub struct ChartService {
    geocoder: Arc<dyn GeocodingProvider>,
    resolver: PositionResolver,
    detector: AspectDetector,
    settings: ChartSettings,
}

impl ChartService {
    pub fn new(
        geocoder: Arc<dyn GeocodingProvider>,
        ephemeris: Arc<dyn EphemerisProvider>,
        settings: ChartSettings,
    ) -> Self {
        let resolver = PositionResolver::new(ephemeris, settings.house_system);
        let detector = AspectDetector::new(settings.aspects.clone(), settings.bodies.clone());
        Self {
            geocoder,
            resolver,
            detector,
            settings,
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn locale(&self) -> SignLocale {
        self.settings.locale
    }

    pub fn geocoder_name(&self) -> &'static str {
        self.geocoder.name()
    }

    pub fn ephemeris_name(&self) -> &'static str {
        self.resolver.ephemeris_name()
    }

    /// Compute sign placements for every tracked body at the birth moment.
    ///
    /// # Returns
    /// * `Ok(NatalChart)` - Placements, the timezone used, and cusps when requested
    /// * `Err(ChartError::MissingField)` - `birth_date` or `location` absent or blank
    /// * `Err(ChartError)` - Any parse, geocoding or ephemeris failure
    pub async fn natal_chart(&self, input: NatalChartInput) -> ChartResult<NatalChart> {
        let birth_date = required(&input.birth_date, "birth_date")?;
        let location_text = required(&input.location, "location")?;

        let location = self.geocoder.lookup(location_text).await?;
        log::debug!(
            "'{}' resolved to ({:.4}, {:.4}) {}",
            location_text,
            location.coordinate.latitude,
            location.coordinate.longitude,
            location.timezone
        );
        let instant = time::normalize(birth_date, &location.timezone)?;

        let planets = self
            .resolver
            .resolve(instant, Some(location.coordinate), &self.settings.bodies)?;
        let houses = if input.include_houses {
            Some(self.resolver.resolve_houses(instant, location.coordinate)?)
        } else {
            None
        };

        Ok(NatalChart {
            planets,
            timezone: location.timezone.clone(),
            houses,
            instant,
            location,
        })
    }

    /// Compute transit placements and their aspects to the natal chart.
    ///
    /// Both local times are interpreted in the birth location's timezone.
    pub async fn transit_chart(&self, input: TransitInput) -> ChartResult<TransitChart> {
        let birth_date = required(&input.birth_date, "birth_date")?;
        let location_text = required(&input.location, "location")?;
        let target_date = required(&input.target_date, "target_date")?;

        let location = self.geocoder.lookup(location_text).await?;
        let birth = time::normalize(birth_date, &location.timezone)?;
        let target = time::normalize(target_date, &location.timezone)?;

        let bodies = &self.settings.bodies;
        let natal = self.resolver.resolve_positions(birth, bodies)?;
        let transit = self.resolver.resolve_positions(target, bodies)?;
        let aspects = self.detector.detect_aspects(&transit, &natal)?;

        let transits = transit
            .iter()
            .map(|(body, position)| (*body, position.placement()))
            .collect();

        Ok(TransitChart {
            transits,
            aspects,
            timezone: location.timezone,
        })
    }
}

/// Borrow a required text field, treating blank as absent.
fn required<'a>(value: &'a Option<String>, field: &'static str) -> ChartResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ChartError::MissingField { field }),
    }
}
