//! Tracked bodies, zodiac signs and the longitude → sign mapping.

use std::fmt;
use std::str::FromStr;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// Width of one zodiac sign in degrees.
pub const SIGN_WIDTH_DEG: f64 = 30.0;

/// A body whose ecliptic longitude is tracked in every chart.
///
/// The declaration order is the fixed tracked-body order; `Ord` follows it so
/// ordered maps keyed by `Body` iterate Sun first, Pluto last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// All tracked bodies in their fixed order.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// One of the twelve 30° segments of the ecliptic, starting at longitude 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Signs in circular order; position in this array is the sign index.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign for an index, wrapping modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Localized display name.
    pub fn name(&self, locale: SignLocale) -> &'static str {
        locale.names()[self.index()]
    }
}

/// Language used for sign names in responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignLocale {
    #[default]
    Turkish,
    English,
}

const TURKISH_SIGNS: [&str; 12] = [
    "Koç", "Boğa", "İkizler", "Yengeç", "Aslan", "Başak", "Terazi", "Akrep", "Yay", "Oğlak",
    "Kova", "Balık",
];

const ENGLISH_SIGNS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

impl SignLocale {
    pub fn names(&self) -> &'static [&'static str; 12] {
        match self {
            SignLocale::Turkish => &TURKISH_SIGNS,
            SignLocale::English => &ENGLISH_SIGNS,
        }
    }
}

impl FromStr for SignLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "turkish" | "tr" => Ok(Self::Turkish),
            "english" | "en" => Ok(Self::English),
            _ => Err(format!("Unknown sign locale: {}", s)),
        }
    }
}

/// Sign and position within the sign for one longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignPlacement {
    pub sign: ZodiacSign,
    /// Degree within the sign, rounded to 2 decimals, in `[0, 30)`.
    pub degree: f64,
}

impl SignPlacement {
    pub fn sign_index(&self) -> usize {
        self.sign.index()
    }
}

/// Ecliptic longitude of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub body: Body,
    /// Longitude in `[0, 360)`.
    pub longitude: Degrees,
}

impl BodyPosition {
    /// Create a position, reducing the longitude into `[0, 360)`.
    pub fn new(body: Body, longitude: Degrees) -> Self {
        Self {
            body,
            longitude: Degrees::new(normalize_longitude(longitude.value())),
        }
    }

    pub fn placement(&self) -> SignPlacement {
        degree_to_sign(self.longitude)
    }
}

/// Reduce any longitude into `[0, 360)`.
pub fn normalize_longitude(longitude: f64) -> f64 {
    let reduced = longitude.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Map an ecliptic longitude to its sign and degree-in-sign.
///
/// Inputs outside `[0, 360)` are reduced first, so 360.0 maps to Aries 0.00.
/// Rounding to two decimals never carries into the next sign: a value that
/// would round to 30.00 is reported as 29.99 in the same sign.
pub fn degree_to_sign(longitude: Degrees) -> SignPlacement {
    let lon = normalize_longitude(longitude.value());
    let index = ((lon / SIGN_WIDTH_DEG).floor() as usize) % 12;
    let in_sign = lon - index as f64 * SIGN_WIDTH_DEG;
    let mut degree = (in_sign * 100.0).round() / 100.0;
    if degree >= SIGN_WIDTH_DEG {
        degree = (SIGN_WIDTH_DEG * 100.0 - 1.0) / 100.0;
    }

    SignPlacement {
        sign: ZodiacSign::from_index(index),
        degree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_order_is_fixed() {
        let names: Vec<&str> = Body::ALL.iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            vec![
                "Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus",
                "Neptune", "Pluto"
            ]
        );
        assert!(Body::Sun < Body::Pluto);
    }

    #[test]
    fn test_body_from_str() {
        assert_eq!("moon".parse::<Body>().unwrap(), Body::Moon);
        assert_eq!("Saturn".parse::<Body>().unwrap(), Body::Saturn);
        assert!("Chiron".parse::<Body>().is_err());
    }

    #[test]
    fn test_cancer_at_95_degrees() {
        let placement = degree_to_sign(Degrees::new(95.0));
        assert_eq!(placement.sign_index(), 3);
        assert_eq!(placement.sign, ZodiacSign::Cancer);
        assert_eq!(placement.degree, 5.0);
        assert_eq!(placement.sign.name(SignLocale::Turkish), "Yengeç");
    }

    #[test]
    fn test_zero_longitude() {
        let placement = degree_to_sign(Degrees::new(0.0));
        assert_eq!(placement.sign_index(), 0);
        assert_eq!(placement.degree, 0.0);
    }

    #[test]
    fn test_full_circle_wraps_to_aries() {
        let placement = degree_to_sign(Degrees::new(360.0));
        assert_eq!(placement.sign_index(), 0);
        assert_eq!(placement.degree, 0.0);
    }

    #[test]
    fn test_just_below_full_circle_stays_in_pisces() {
        let placement = degree_to_sign(Degrees::new(359.999));
        assert_eq!(placement.sign_index(), 11);
        assert!(placement.degree < 30.0);
        assert_eq!(placement.degree, 29.99);
    }

    #[test]
    fn test_negative_longitude_is_reduced() {
        let placement = degree_to_sign(Degrees::new(-15.0));
        assert_eq!(placement.sign, ZodiacSign::Pisces);
        assert_eq!(placement.degree, 15.0);
    }

    #[test]
    fn test_degree_rounded_to_two_decimals() {
        let placement = degree_to_sign(Degrees::new(123.45678));
        assert_eq!(placement.sign, ZodiacSign::Leo);
        assert_eq!(placement.degree, 3.46);
    }

    #[test]
    fn test_locale_names() {
        assert_eq!(ZodiacSign::Aries.name(SignLocale::Turkish), "Koç");
        assert_eq!(ZodiacSign::Pisces.name(SignLocale::Turkish), "Balık");
        assert_eq!(ZodiacSign::Pisces.name(SignLocale::English), "Pisces");
        assert_eq!("en".parse::<SignLocale>().unwrap(), SignLocale::English);
        assert_eq!(SignLocale::default(), SignLocale::Turkish);
    }

    #[test]
    fn test_body_position_reduces_longitude() {
        let pos = BodyPosition::new(Body::Mars, Degrees::new(370.5));
        assert_eq!(pos.longitude.value(), 10.5);
        assert_eq!(pos.placement().sign, ZodiacSign::Aries);
    }

    #[test]
    fn test_sign_from_index_wraps() {
        assert_eq!(ZodiacSign::from_index(12), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_index(11), ZodiacSign::Pisces);
    }
}
