//! File-backed ephemeris.
//!
//! Longitudes are precomputed and stored as evenly spaced samples per body.
//! [`EphemerisTable::sample`] builds such a table from any other provider,
//! which is how a table is generated from the analytic ephemeris. Lookups interpolate between the two
//! neighbouring samples along the shorter arc, so a body crossing 0° Aries
//! between samples is handled correctly.
//!
//! File layout (`ephemeris.json`):
//!
//! ```json
//! {
//!   "start_jd": 2447892.5,
//!   "step_days": 1.0,
//!   "bodies": { "Sun": [280.1, 281.1], "Moon": [12.0, 25.2] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use super::houses;
use crate::error::{ChartError, ChartResult};
use crate::models::zodiac::normalize_longitude;
use crate::models::{Body, GeoCoordinate, JulianDay};
use crate::providers::ephemeris::{EphemerisProvider, HouseSystem};

/// File name looked up inside the ephemeris directory.
pub const EPHEMERIS_FILE_NAME: &str = "ephemeris.json";

/// Raw sample table as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisTable {
    /// Julian Day of the first sample.
    pub start_jd: f64,
    /// Spacing between samples in days.
    pub step_days: f64,
    /// Longitude samples per body, in degrees.
    pub bodies: BTreeMap<Body, Vec<f64>>,
}

impl EphemerisTable {
    /// Sample `count` instants of every body from `provider`, `step_days` apart.
    pub fn sample(
        provider: &dyn EphemerisProvider,
        start: JulianDay,
        step_days: f64,
        count: usize,
    ) -> ChartResult<Self> {
        let mut bodies = BTreeMap::new();
        for body in Body::ALL {
            let samples = (0..count)
                .map(|i| {
                    let instant = JulianDay::new(start.value() + i as f64 * step_days);
                    provider.longitude(body, instant).map(|lon| lon.value())
                })
                .collect::<ChartResult<Vec<f64>>>()?;
            bodies.insert(body, samples);
        }
        Ok(Self {
            start_jd: start.value(),
            step_days,
            bodies,
        })
    }

    /// Write the table as `ephemeris.json` inside `dir`.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> ChartResult<()> {
        let path = dir.as_ref().join(EPHEMERIS_FILE_NAME);
        let content = serde_json::to_string(self).map_err(|e| {
            ChartError::configuration(format!("Failed to encode ephemeris table: {}", e))
        })?;
        fs::write(&path, content).map_err(|e| {
            ChartError::configuration(format!(
                "Failed to write ephemeris file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Ephemeris answering from an [`EphemerisTable`].
#[derive(Debug, Clone)]
pub struct TabulatedEphemeris {
    table: EphemerisTable,
}

impl TabulatedEphemeris {
    /// Wrap a table after checking it is usable.
    pub fn new(table: EphemerisTable) -> ChartResult<Self> {
        if !table.start_jd.is_finite() {
            return Err(ChartError::configuration("ephemeris start_jd must be finite"));
        }
        if !(table.step_days.is_finite() && table.step_days > 0.0) {
            return Err(ChartError::configuration(
                "ephemeris step_days must be a positive number",
            ));
        }
        for (body, samples) in &table.bodies {
            if samples.is_empty() {
                return Err(ChartError::configuration(format!(
                    "ephemeris series for {} is empty",
                    body
                )));
            }
            if samples.iter().any(|v| !v.is_finite()) {
                return Err(ChartError::configuration(format!(
                    "ephemeris series for {} contains non-finite values",
                    body
                )));
            }
        }
        Ok(Self { table })
    }

    /// Load a table from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ChartResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChartError::configuration(format!(
                "Failed to read ephemeris file {}: {}",
                path.display(),
                e
            ))
        })?;
        let table: EphemerisTable = serde_json::from_str(&content).map_err(|e| {
            ChartError::configuration(format!(
                "Failed to parse ephemeris file {}: {}",
                path.display(),
                e
            ))
        })?;
        log::info!(
            "Loaded ephemeris table {} ({} bodies, start JD {}, step {} d)",
            path.display(),
            table.bodies.len(),
            table.start_jd,
            table.step_days
        );
        Self::new(table)
    }

    /// Load `ephemeris.json` from a directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> ChartResult<Self> {
        Self::from_file(dir.as_ref().join(EPHEMERIS_FILE_NAME))
    }

    /// First and last instant covered for a body, if the body is present.
    pub fn coverage(&self, body: Body) -> Option<(JulianDay, JulianDay)> {
        self.table.bodies.get(&body).map(|samples| {
            let last = self.table.start_jd + (samples.len() - 1) as f64 * self.table.step_days;
            (JulianDay::new(self.table.start_jd), JulianDay::new(last))
        })
    }
}

/// Interpolate between two longitudes along the shorter arc.
fn interpolate_longitude(a: f64, b: f64, fraction: f64) -> f64 {
    let delta = (b - a + 540.0).rem_euclid(360.0) - 180.0;
    normalize_longitude(a + fraction * delta)
}

impl EphemerisProvider for TabulatedEphemeris {
    fn longitude(&self, body: Body, instant: JulianDay) -> ChartResult<Degrees> {
        let jd = instant.value();
        let samples = self
            .table
            .bodies
            .get(&body)
            .ok_or_else(|| ChartError::ephemeris_body(body, jd, "body not present in table"))?;

        let position = (jd - self.table.start_jd) / self.table.step_days;
        let last = (samples.len() - 1) as f64;
        // allow for rounding when the instant sits exactly on the last sample
        if !position.is_finite() || position < -1e-9 || position > last + 1e-9 {
            let (first, end) = self.coverage(body).unwrap_or((instant, instant));
            return Err(ChartError::ephemeris_body(
                body,
                jd,
                format!(
                    "outside table range JD {} to {}",
                    first.value(),
                    end.value()
                ),
            ));
        }

        if samples.len() == 1 {
            return Ok(Degrees::new(normalize_longitude(samples[0])));
        }

        let position = position.clamp(0.0, last);
        let index = (position.floor() as usize).min(samples.len() - 2);
        let fraction = position - index as f64;
        let lon = interpolate_longitude(samples[index], samples[index + 1], fraction);
        Ok(Degrees::new(lon))
    }

    fn house_cusps(
        &self,
        instant: JulianDay,
        coordinate: GeoCoordinate,
        system: HouseSystem,
    ) -> ChartResult<[Degrees; 12]> {
        houses::house_cusps(instant, coordinate, system)
    }

    fn name(&self) -> &'static str {
        "tabulated"
    }
}
