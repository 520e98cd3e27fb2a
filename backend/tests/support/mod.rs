#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use qtty::Degrees;

use astro_chart::error::{ChartError, ChartResult};
use astro_chart::models::{Body, GeoCoordinate, GeoLocation, JulianDay};
use astro_chart::providers::{EphemerisProvider, GeocodingProvider, HouseSystem};
use astro_chart::services::{ChartService, ChartSettings};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// J2000.0, `2000-01-01 12:00` UTC.
pub const J2000: f64 = 2451545.0;

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Geocoder over a fixed table that counts lookups.
#[derive(Default)]
pub struct CountingGeocoder {
    places: BTreeMap<String, GeoLocation>,
    calls: AtomicUsize,
}

impl CountingGeocoder {
    pub fn new() -> Self {
        Self::default()
            .with_place("Istanbul", 41.0082, 28.9784, "Europe/Istanbul")
            .with_place("Greenwich", 51.4779, 0.0, "UTC")
            .with_place("New York", 40.7128, -74.006, "America/New_York")
            .with_place("Atlantis", 0.0, 0.0, "Atlantis/Lost_City")
    }

    pub fn with_place(mut self, name: &str, lat: f64, lon: f64, timezone: &str) -> Self {
        let coordinate = GeoCoordinate::new(lat, lon).unwrap();
        self.places.insert(
            name.to_string(),
            GeoLocation {
                coordinate,
                timezone: timezone.to_string(),
                formatted: Some(name.to_string()),
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingProvider for CountingGeocoder {
    async fn lookup(&self, location: &str) -> ChartResult<GeoLocation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if location == "Unreachable" {
            return Err(ChartError::geocoding("connection refused"));
        }
        self.places
            .get(location)
            .cloned()
            .ok_or_else(|| ChartError::LocationNotFound {
                location: location.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Ephemeris with scripted longitudes at exact instants.
///
/// Bodies without a script sit at `1 + 7 * index` degrees (Sun 1°, Pluto 64°),
/// a layout where the only aspects are conjunctions between equal bodies.
pub struct ScriptedEphemeris {
    scripts: Vec<(f64, BTreeMap<Body, f64>)>,
    calls: AtomicUsize,
}

impl ScriptedEphemeris {
    pub fn new() -> Self {
        Self {
            scripts: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Longitudes for `instant`; bodies not listed fall back to the default layout.
    pub fn at(mut self, instant: f64, longitudes: &[(Body, f64)]) -> Self {
        self.scripts
            .push((instant, longitudes.iter().copied().collect()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn default_longitude(body: Body) -> f64 {
        let index = Body::ALL.iter().position(|b| *b == body).unwrap_or(0);
        index as f64 * 7.0 + 1.0
    }
}

impl EphemerisProvider for ScriptedEphemeris {
    fn longitude(&self, body: Body, instant: JulianDay) -> ChartResult<Degrees> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let jd = instant.value();
        if jd < 2_000_000.0 {
            return Err(ChartError::ephemeris_body(body, jd, "before table start"));
        }
        let scripted = self
            .scripts
            .iter()
            .find(|(at, _)| (at - jd).abs() < 1e-6)
            .and_then(|(_, table)| table.get(&body).copied());
        Ok(Degrees::new(
            scripted.unwrap_or_else(|| Self::default_longitude(body)),
        ))
    }

    fn house_cusps(
        &self,
        _instant: JulianDay,
        _coordinate: GeoCoordinate,
        system: HouseSystem,
    ) -> ChartResult<[Degrees; 12]> {
        // stands in for a provider that cannot place houses for this observer
        if system == HouseSystem::Placidus {
            return Err(ChartError::ephemeris("house cusps", 0.0, "Placidus undefined here"));
        }
        Ok(std::array::from_fn(|i| Degrees::new(30.0 * i as f64 + 12.5)))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Service wired to the given fakes with default settings.
pub fn service_with(
    geocoder: Arc<CountingGeocoder>,
    ephemeris: Arc<ScriptedEphemeris>,
) -> ChartService {
    ChartService::new(geocoder, ephemeris, ChartSettings::default())
}
