//! Chart angles and house division.
//!
//! Sidereal time and mean obliquity follow the IAU 1982 expressions given in
//! Meeus, *Astronomical Algorithms*, ch. 12 and 22. Accuracy is a few arc
//! seconds over several centuries, far below the 0.01° resolution of the
//! output. Placidus cusps are found by iterating on the semi-arcs until
//! the right ascension settles.

use qtty::Degrees;

use crate::error::{ChartError, ChartResult};
use crate::models::zodiac::normalize_longitude;
use crate::models::{GeoCoordinate, JulianDay};
use crate::providers::ephemeris::HouseSystem;

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(instant: JulianDay) -> f64 {
    let t = instant.days_since_j2000() / 36525.0;
    23.439_291_1 - 0.013_004_2 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t
}

/// Greenwich mean sidereal time in degrees.
pub fn greenwich_sidereal_time(instant: JulianDay) -> f64 {
    let d = instant.days_since_j2000();
    let t = d / 36525.0;
    normalize_longitude(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Midheaven longitude for a right ascension of the meridian.
pub fn midheaven(ramc: f64, obliquity: f64) -> f64 {
    let r = ramc.to_radians();
    let e = obliquity.to_radians();
    normalize_longitude(r.sin().atan2(r.cos() * e.cos()).to_degrees())
}

/// Ascendant longitude for a right ascension of the meridian and latitude.
pub fn ascendant(ramc: f64, obliquity: f64, latitude: f64) -> f64 {
    let r = ramc.to_radians();
    let e = obliquity.to_radians();
    let phi = latitude.to_radians();
    let y = r.cos();
    let x = -(r.sin() * e.cos() + phi.tan() * e.sin());
    normalize_longitude(y.atan2(x).to_degrees())
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra`.
fn ecliptic_from_right_ascension(ra: f64, obliquity: f64) -> f64 {
    let r = ra.to_radians();
    normalize_longitude(r.sin().atan2(r.cos() * obliquity.to_radians().cos()).to_degrees())
}

/// Sidereal frame of one chart: meridian, obliquity, latitude and the two angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAngles {
    pub ramc: f64,
    pub obliquity: f64,
    pub latitude: f64,
    pub asc: f64,
    pub mc: f64,
}

impl ChartAngles {
    /// Angles for an observer at `coordinate` at `instant` (UT).
    pub fn new(instant: JulianDay, coordinate: GeoCoordinate) -> Self {
        let ramc = normalize_longitude(greenwich_sidereal_time(instant) + coordinate.longitude);
        Self::from_ramc(ramc, mean_obliquity(instant), coordinate.latitude)
    }

    pub fn from_ramc(ramc: f64, obliquity: f64, latitude: f64) -> Self {
        Self {
            ramc,
            obliquity,
            latitude,
            asc: ascendant(ramc, obliquity, latitude),
            mc: midheaven(ramc, obliquity),
        }
    }
}

/// Placidus cusp trisecting a semi-arc.
///
/// Above the horizon the cusp sits `fraction` of the diurnal semi-arc east of
/// the meridian (houses 11 and 12); below it, `fraction` of the nocturnal
/// semi-arc west of the lower meridian (houses 3 and 2). `None` when the
/// semi-arc does not exist, which happens inside the polar circles.
fn placidus_cusp(angles: &ChartAngles, fraction: f64, above: bool) -> Option<f64> {
    let sin_eps = angles.obliquity.to_radians().sin();
    let tan_phi = angles.latitude.to_radians().tan();

    let target = |diurnal: f64| {
        if above {
            angles.ramc + fraction * diurnal
        } else {
            angles.ramc + 180.0 - fraction * (180.0 - diurnal)
        }
    };

    let mut ra = target(90.0);
    for _ in 0..100 {
        let lon = ecliptic_from_right_ascension(ra, angles.obliquity);
        let declination = (sin_eps * lon.to_radians().sin()).asin();
        let x = -tan_phi * declination.tan();
        if !(-1.0..=1.0).contains(&x) {
            return None;
        }
        let next = target(x.acos().to_degrees());
        let converged = (next - ra).abs() < 1e-10;
        ra = next;
        if converged {
            return Some(ecliptic_from_right_ascension(ra, angles.obliquity));
        }
    }
    None
}

/// Divide the chart into twelve houses.
pub fn divide_houses(system: HouseSystem, angles: &ChartAngles) -> Option<[f64; 12]> {
    let (asc, mc) = (angles.asc, angles.mc);
    let mut cusps = [0.0; 12];
    match system {
        HouseSystem::Equal => {
            for (i, cusp) in cusps.iter_mut().enumerate() {
                *cusp = normalize_longitude(asc + 30.0 * i as f64);
            }
        }
        HouseSystem::WholeSign => {
            let first = (asc / 30.0).floor() * 30.0;
            for (i, cusp) in cusps.iter_mut().enumerate() {
                *cusp = normalize_longitude(first + 30.0 * i as f64);
            }
        }
        HouseSystem::Porphyry => {
            let ic = normalize_longitude(mc + 180.0);
            let upper = (asc - mc).rem_euclid(360.0) / 3.0;
            let lower = (ic - asc).rem_euclid(360.0) / 3.0;

            cusps[0] = asc;
            cusps[1] = asc + lower;
            cusps[2] = asc + 2.0 * lower;
            cusps[9] = mc;
            cusps[10] = mc + upper;
            cusps[11] = mc + 2.0 * upper;
        }
        HouseSystem::Placidus => {
            cusps[0] = asc;
            cusps[1] = placidus_cusp(angles, 2.0 / 3.0, false)?;
            cusps[2] = placidus_cusp(angles, 1.0 / 3.0, false)?;
            cusps[9] = mc;
            cusps[10] = placidus_cusp(angles, 1.0 / 3.0, true)?;
            cusps[11] = placidus_cusp(angles, 2.0 / 3.0, true)?;
        }
    }
    if matches!(system, HouseSystem::Porphyry | HouseSystem::Placidus) {
        // houses 4-9 mirror 10-3
        for i in 3..9 {
            cusps[i] = cusps[(i + 6) % 12] + 180.0;
        }
        for cusp in cusps.iter_mut() {
            *cusp = normalize_longitude(*cusp);
        }
    }
    Some(cusps)
}

/// House cusps for an instant and observer.
pub fn house_cusps(
    instant: JulianDay,
    coordinate: GeoCoordinate,
    system: HouseSystem,
) -> ChartResult<[Degrees; 12]> {
    let angles = ChartAngles::new(instant, coordinate);
    let cusps = divide_houses(system, &angles).ok_or_else(|| {
        ChartError::ephemeris(
            "house cusps",
            instant.value(),
            format!(
                "{} houses are undefined at latitude {}",
                system, coordinate.latitude
            ),
        )
    })?;
    Ok(cusps.map(Degrees::new))
}
