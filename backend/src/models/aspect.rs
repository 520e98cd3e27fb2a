//! Aspect kinds, the rule table and angular separation.

use std::fmt;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use super::zodiac::Body;

/// Default tolerance around each aspect angle.
pub const DEFAULT_ORB_DEG: f64 = 5.0;

/// A named angular relationship between two longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Exact angle of the aspect in degrees.
    pub fn angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recognized aspect with its allowed orb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRule {
    pub kind: AspectKind,
    pub orb: f64,
}

impl AspectRule {
    pub fn matches(&self, separation: f64) -> bool {
        (separation - self.kind.angle()).abs() <= self.orb
    }
}

/// Ordered set of aspect rules; earlier rules take priority.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectTable {
    rules: Vec<AspectRule>,
}

impl AspectTable {
    /// Conjunction, square, trine and opposition, each with the same orb.
    ///
    /// Sextile and the minor aspects are deliberately absent.
    pub fn with_orb(orb: f64) -> Self {
        let rules = [
            AspectKind::Conjunction,
            AspectKind::Square,
            AspectKind::Trine,
            AspectKind::Opposition,
        ]
        .into_iter()
        .map(|kind| AspectRule { kind, orb })
        .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[AspectRule] {
        &self.rules
    }

    /// First rule (in priority order) whose orb contains `separation`.
    pub fn classify(&self, separation: f64) -> Option<AspectKind> {
        self.rules
            .iter()
            .find(|rule| rule.matches(separation))
            .map(|rule| rule.kind)
    }
}

impl Default for AspectTable {
    fn default() -> Self {
        Self::with_orb(DEFAULT_ORB_DEG)
    }
}

/// A detected aspect between a transiting and a natal body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aspect {
    pub transit_body: Body,
    pub natal_body: Body,
    pub kind: AspectKind,
    /// Exact angular separation in `[0, 180]`.
    pub separation: Degrees,
}

impl Aspect {
    /// Distance from the exact aspect angle.
    pub fn orb(&self) -> f64 {
        (self.separation.value() - self.kind.angle()).abs()
    }
}

/// Shorter-arc distance between two longitudes, in `[0, 180]`.
pub fn angular_separation(a: Degrees, b: Degrees) -> Degrees {
    let diff = (a.value() - b.value()).rem_euclid(360.0).abs();
    if diff > 180.0 {
        Degrees::new(360.0 - diff)
    } else {
        Degrees::new(diff)
    }
}
