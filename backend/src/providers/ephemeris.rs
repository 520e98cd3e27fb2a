//! Ephemeris provider trait and house-system types.

use std::fmt;
use std::str::FromStr;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::models::{Body, GeoCoordinate, JulianDay};

/// Division scheme used to compute the twelve house cusps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    Placidus,
    #[default]
    Porphyry,
    Equal,
    WholeSign,
}

impl HouseSystem {
    pub fn name(&self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Porphyry => "porphyry",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole_sign",
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = String;

    /// Parse a house system from its name or its one-letter code (`P`, `O`, `E`, `W`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "placidus" | "p" => Ok(Self::Placidus),
            "porphyry" | "o" => Ok(Self::Porphyry),
            "equal" | "e" => Ok(Self::Equal),
            "whole_sign" | "wholesign" | "w" => Ok(Self::WholeSign),
            _ => Err(format!("Unknown house system: {}", s)),
        }
    }
}

/// The twelve house cusps of a chart, house 1 first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseCusps {
    pub system: HouseSystem,
    pub cusps: [Degrees; 12],
}

/// Source of body longitudes and house cusps.
///
/// Implementations are pure lookups: identical inputs give identical
/// outputs, and failures are deterministic (not worth retrying).
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one instance serves all requests.
pub trait EphemerisProvider: Send + Sync {
    /// Geocentric ecliptic longitude of `body` at `instant`.
    ///
    /// # Returns
    /// * `Ok(Degrees)` - Longitude, expected in `[0, 360)`
    /// * `Err(ChartError::EphemerisUnavailable)` - Body unsupported or instant out of range
    fn longitude(&self, body: Body, instant: JulianDay) -> ChartResult<Degrees>;

    /// House cusps for an observer at `coordinate`.
    ///
    /// # Returns
    /// * `Ok([Degrees; 12])` - Cusps of houses 1 through 12
    /// * `Err(ChartError::EphemerisUnavailable)` - House system unsupported
    fn house_cusps(
        &self,
        instant: JulianDay,
        coordinate: GeoCoordinate,
        system: HouseSystem,
    ) -> ChartResult<[Degrees; 12]>;

    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &'static str;
}
