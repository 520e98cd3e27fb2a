//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies are the service input types. Responses flatten the
//! computed charts into localized sign names and rounded degrees.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{degree_to_sign, Aspect, Body, SignLocale, SignPlacement};
use crate::providers::HouseCusps;
use crate::services::{NatalChart, TransitChart};

pub use crate::services::{NatalChartInput as NatalChartRequest, TransitInput as TransitRequest};

/// Sign name and degree within the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementDto {
    pub sign: String,
    pub degree: f64,
}

impl PlacementDto {
    pub fn from_placement(placement: &SignPlacement, locale: SignLocale) -> Self {
        Self {
            sign: placement.sign.name(locale).to_string(),
            degree: placement.degree,
        }
    }
}

/// One house cusp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCuspDto {
    /// House number, 1 to 12.
    pub house: u8,
    pub sign: String,
    pub degree: f64,
}

/// House cusps and the division used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousesDto {
    pub system: String,
    pub cusps: Vec<HouseCuspDto>,
}

impl HousesDto {
    pub fn from_cusps(houses: &HouseCusps, locale: SignLocale) -> Self {
        let cusps = houses
            .cusps
            .iter()
            .enumerate()
            .map(|(i, cusp)| {
                let placement = degree_to_sign(*cusp);
                HouseCuspDto {
                    house: i as u8 + 1,
                    sign: placement.sign.name(locale).to_string(),
                    degree: placement.degree,
                }
            })
            .collect();
        Self {
            system: houses.system.name().to_string(),
            cusps,
        }
    }
}

/// Response for `POST /natal-chart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NatalChartResponse {
    pub planets: BTreeMap<Body, PlacementDto>,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub houses: Option<HousesDto>,
}

impl NatalChartResponse {
    pub fn from_chart(chart: &NatalChart, locale: SignLocale) -> Self {
        Self {
            planets: placements(&chart.planets, locale),
            timezone: chart.timezone.clone(),
            houses: chart
                .houses
                .as_ref()
                .map(|h| HousesDto::from_cusps(h, locale)),
        }
    }
}

/// One transit-to-natal aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDto {
    pub transit_planet: Body,
    pub natal_planet: Body,
    pub aspect: String,
    /// Angular separation, rounded to 2 decimals.
    pub angle: f64,
}

impl From<&Aspect> for AspectDto {
    fn from(aspect: &Aspect) -> Self {
        Self {
            transit_planet: aspect.transit_body,
            natal_planet: aspect.natal_body,
            aspect: aspect.kind.name().to_string(),
            angle: (aspect.separation.value() * 100.0).round() / 100.0,
        }
    }
}

/// Response for `POST /transit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitResponse {
    pub transits: BTreeMap<Body, PlacementDto>,
    pub aspects: Vec<AspectDto>,
    pub timezone: String,
}

impl TransitResponse {
    pub fn from_chart(chart: &TransitChart, locale: SignLocale) -> Self {
        Self {
            transits: placements(&chart.transits, locale),
            aspects: chart.aspects.iter().map(AspectDto::from).collect(),
            timezone: chart.timezone.clone(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ephemeris: String,
    pub geocoder: String,
}

fn placements(
    source: &BTreeMap<Body, SignPlacement>,
    locale: SignLocale,
) -> BTreeMap<Body, PlacementDto> {
    source
        .iter()
        .map(|(body, p)| (*body, PlacementDto::from_placement(p, locale)))
        .collect()
}
