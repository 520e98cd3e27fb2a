//! Built-in analytic ephemeris.
//!
//! Needs no data files, so it is the default provider.
//!
//! - Sun: Meeus, *Astronomical Algorithms*, ch. 25 (low accuracy solution)
//! - Moon: Meeus ch. 47, the periodic longitude terms above 20" amplitude
//! - Planets and Pluto: JPL Keplerian elements (Standish, "Approximate
//!   Positions of the Planets", table 1), reduced to geocentric positions
//!   against the Earth-Moon barycentre
//!
//! All longitudes are apparent, referred to the ecliptic and equinox of date.
//! Input instants are UT; they are shifted to TT with a polynomial ΔT before
//! evaluation. The element table is fitted to 1800-2050, which bounds the
//! supported range. Inside it the Sun and Moon agree with full theories to
//! about 0.01°. The inner planets come within a few arc minutes. Jupiter and
//! Saturn can be off by up to 0.2° because the table has no great-inequality
//! terms.

use qtty::Degrees;

use super::houses;
use crate::error::{ChartError, ChartResult};
use crate::models::zodiac::normalize_longitude;
use crate::models::{Body, GeoCoordinate, JulianDay};
use crate::providers::ephemeris::{EphemerisProvider, HouseSystem};

/// 1800-01-01 00:00 UT.
pub const ANALYTIC_START_JD: f64 = 2378496.5;
/// 2051-01-01 00:00 UT.
pub const ANALYTIC_END_JD: f64 = 2470172.5;

const J2000: f64 = 2451545.0;
const DAYS_PER_CENTURY: f64 = 36525.0;
/// General precession in ecliptic longitude, degrees per Julian century.
const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971_3;

/// Julian centuries of TT since J2000 for a UT instant.
pub fn centuries_tt(instant: JulianDay) -> f64 {
    let jd_tt = instant.value() + delta_t_seconds(instant) / 86_400.0;
    (jd_tt - J2000) / DAYS_PER_CENTURY
}

/// TT - UT in seconds (Espenak and Meeus polynomials, long-term parabola
/// outside 1986-2050).
pub fn delta_t_seconds(instant: JulianDay) -> f64 {
    let year = 2000.0 + instant.days_since_j2000() / 365.25;
    if (2005.0..=2050.0).contains(&year) {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if (1986.0..2005.0).contains(&year) {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

/// Nutation in longitude in degrees (Meeus ch. 22, 0.5" terms).
pub fn nutation_longitude(t: f64) -> f64 {
    let omega = (125.044_52 - 1_934.136_261 * t).to_radians();
    let sun = (280.4665 + 36_000.7698 * t).to_radians();
    let moon = (218.3165 + 481_267.8813 * t).to_radians();
    let arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * sun).sin() - 0.23 * (2.0 * moon).sin()
        + 0.21 * (2.0 * omega).sin();
    arcsec / 3600.0
}

/// Apparent solar longitude for `t` Julian centuries of TT.
pub fn sun_longitude(t: f64) -> f64 {
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_longitude(mean_longitude + center - 0.005_69 - 0.004_78 * omega.sin())
}

/// Moon longitude terms: multiples of D, M, M', F and the amplitude in 1e-6 degrees.
const MOON_TERMS: [(i8, i8, i8, i8, f64); 34] = [
    (0, 0, 1, 0, 6_288_774.0),
    (2, 0, -1, 0, 1_274_027.0),
    (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0),
    (0, 1, 0, 0, -185_116.0),
    (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0),
    (2, -1, -1, 0, 57_066.0),
    (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0),
    (0, 1, -1, 0, -40_923.0),
    (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0),
    (2, 0, 0, -2, 15_327.0),
    (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0),
    (4, 0, -1, 0, 10_675.0),
    (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0),
    (2, 1, -1, 0, -7_888.0),
    (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0),
    (1, 1, 0, 0, 4_987.0),
    (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0),
    (4, 0, 0, 0, 3_861.0),
    (2, 0, -3, 0, 3_665.0),
    (0, 1, -2, 0, -2_689.0),
    (2, 0, -1, 2, -2_602.0),
    (2, -1, -2, 0, 2_390.0),
    (1, 0, 1, 0, -2_348.0),
    (2, -2, 0, 0, 2_236.0),
    (0, 1, 2, 0, -2_120.0),
    (0, 2, 0, 0, -2_069.0),
];

/// Apparent lunar longitude for `t` Julian centuries of TT.
pub fn moon_longitude(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let mean_longitude =
        218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0 - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let m_prime = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    // eccentricity of the Earth's orbit scales terms containing M
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let a1 = 119.75 + 131.849 * t;

    let mut sum = 0.0;
    for &(cd, cm, cmp, cf, amplitude) in MOON_TERMS.iter() {
        let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * m_prime + f64::from(cf) * f;
        sum += amplitude * e.powi(i32::from(cm.abs())) * arg.to_radians().sin();
    }
    sum += 3_958.0 * a1.to_radians().sin() + 1_962.0 * (mean_longitude - f).to_radians().sin();

    normalize_longitude(mean_longitude + sum / 1e6 + nutation_longitude(t))
}

/// Keplerian elements at J2000 and their rates per century:
/// a (au), e, I, L, longitude of perihelion, longitude of ascending node (degrees).
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    base: [f64; 6],
    rate: [f64; 6],
}

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};

fn elements(body: Body) -> Option<OrbitalElements> {
    let elements = match body {
        Body::Mercury => OrbitalElements {
            base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
            rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
        },
        Body::Venus => OrbitalElements {
            base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
            rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
        },
        Body::Mars => OrbitalElements {
            base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
            rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
        },
        Body::Jupiter => OrbitalElements {
            base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
            rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
        },
        Body::Saturn => OrbitalElements {
            base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
            rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
        },
        Body::Uranus => OrbitalElements {
            base: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
            rate: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
        },
        Body::Neptune => OrbitalElements {
            base: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
            rate: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
        },
        Body::Pluto => OrbitalElements {
            base: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
            rate: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
        },
        Body::Sun | Body::Moon => return None,
    };
    Some(elements)
}

/// Solve Kepler's equation `M = E - e sin E` for E (radians).
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut anomaly = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..50 {
        let delta = (mean_anomaly - (anomaly - eccentricity * anomaly.sin()))
            / (1.0 - eccentricity * anomaly.cos());
        anomaly += delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    anomaly
}

impl OrbitalElements {
    /// Heliocentric ecliptic coordinates (J2000 frame, au).
    fn heliocentric(&self, t: f64) -> [f64; 3] {
        let mut el = [0.0; 6];
        for (i, value) in el.iter_mut().enumerate() {
            *value = self.base[i] + self.rate[i] * t;
        }
        let [a, e, inclination, mean_longitude, perihelion, node] = el;

        let argument = (perihelion - node).to_radians();
        let mean_anomaly = ((mean_longitude - perihelion + 180.0).rem_euclid(360.0) - 180.0).to_radians();
        let anomaly = eccentric_anomaly(mean_anomaly, e);

        let x_orbit = a * (anomaly.cos() - e);
        let y_orbit = a * (1.0 - e * e).sqrt() * anomaly.sin();

        let (sw, cw) = argument.sin_cos();
        let (sn, cn) = node.to_radians().sin_cos();
        let (si, ci) = inclination.to_radians().sin_cos();

        [
            (cw * cn - sw * sn * ci) * x_orbit + (-sw * cn - cw * sn * ci) * y_orbit,
            (cw * sn + sw * cn * ci) * x_orbit + (-sw * sn + cw * cn * ci) * y_orbit,
            sw * si * x_orbit + cw * si * y_orbit,
        ]
    }
}

/// Apparent geocentric longitude of a planet for `t` Julian centuries of TT.
///
/// Returns `None` for the Sun and Moon, which have their own series.
pub fn planet_longitude(body: Body, t: f64) -> Option<f64> {
    let planet = elements(body)?.heliocentric(t);
    let earth = EARTH_MOON_BARYCENTER.heliocentric(t);
    let lon_j2000 = (planet[1] - earth[1]).atan2(planet[0] - earth[0]).to_degrees();
    Some(normalize_longitude(
        lon_j2000 + PRECESSION_DEG_PER_CENTURY * t + nutation_longitude(t),
    ))
}

/// Ephemeris computed from analytic series, valid 1800-2050.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Whether `instant` falls inside the fitted range of the element table.
    pub fn covers(&self, instant: JulianDay) -> bool {
        (ANALYTIC_START_JD..=ANALYTIC_END_JD).contains(&instant.value())
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn longitude(&self, body: Body, instant: JulianDay) -> ChartResult<Degrees> {
        let jd = instant.value();
        if !self.covers(instant) {
            return Err(ChartError::ephemeris_body(
                body,
                jd,
                format!(
                    "outside analytic range JD {} to {}",
                    ANALYTIC_START_JD, ANALYTIC_END_JD
                ),
            ));
        }

        let t = centuries_tt(instant);
        let lon = match body {
            Body::Sun => sun_longitude(t),
            Body::Moon => moon_longitude(t),
            planet => planet_longitude(planet, t)
                .ok_or_else(|| ChartError::ephemeris_body(body, jd, "no orbital elements"))?,
        };
        Ok(Degrees::new(lon))
    }

    fn house_cusps(
        &self,
        instant: JulianDay,
        coordinate: GeoCoordinate,
        system: HouseSystem,
    ) -> ChartResult<[Degrees; 12]> {
        if !self.covers(instant) {
            return Err(ChartError::ephemeris(
                "house cusps",
                instant.value(),
                "outside analytic range",
            ));
        }
        houses::house_cusps(instant, coordinate, system)
    }

    fn name(&self) -> &'static str {
        "analytic"
    }
}
