//! Aspect detection between two position sets.

use crate::error::{ChartError, ChartResult};
use crate::models::{angular_separation, Aspect, AspectTable, Body};

use super::positions::PositionSet;

/// Finds aspects between transiting and natal positions.
#[derive(Debug, Clone)]
pub struct AspectDetector {
    table: AspectTable,
    bodies: Vec<Body>,
}

impl AspectDetector {
    /// Detector over `bodies` (in that order) using `table`.
    pub fn new(table: AspectTable, bodies: Vec<Body>) -> Self {
        Self { table, bodies }
    }

    pub fn table(&self) -> &AspectTable {
        &self.table
    }

    fn check_complete(&self, positions: &PositionSet) -> ChartResult<()> {
        match self.bodies.iter().find(|b| !positions.contains_key(b)) {
            Some(&body) => Err(ChartError::MissingBody { body }),
            None => Ok(()),
        }
    }

    /// Every transit/natal pair whose separation falls within an aspect orb.
    ///
    /// Pairs are visited transit-major in tracked-body order, which fixes the
    /// order of the result. Each pair yields at most one aspect.
    ///
    /// # Returns
    /// * `Ok(Vec<Aspect>)` - Possibly empty
    /// * `Err(ChartError::MissingBody)` - A tracked body is absent from either set
    pub fn detect_aspects(&self, transit: &PositionSet, natal: &PositionSet) -> ChartResult<Vec<Aspect>> {
        self.check_complete(transit)?;
        self.check_complete(natal)?;

        let mut aspects = Vec::new();
        for transit_body in &self.bodies {
            let t = transit[transit_body].longitude;
            for natal_body in &self.bodies {
                let n = natal[natal_body].longitude;
                let separation = angular_separation(t, n);
                if let Some(kind) = self.table.classify(separation.value()) {
                    aspects.push(Aspect {
                        transit_body: *transit_body,
                        natal_body: *natal_body,
                        kind,
                        separation,
                    });
                }
            }
        }
        log::debug!("detected {} aspects", aspects.len());
        Ok(aspects)
    }
}

impl Default for AspectDetector {
    fn default() -> Self {
        Self::new(AspectTable::default(), Body::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AspectKind, BodyPosition};
    use qtty::Degrees;

    /// Every body at 0° except the overrides.
    fn set(overrides: &[(Body, f64)]) -> PositionSet {
        let mut positions: PositionSet = Body::ALL
            .iter()
            .map(|&b| (b, BodyPosition::new(b, Degrees::new(0.0))))
            .collect();
        for &(body, lon) in overrides {
            positions.insert(body, BodyPosition::new(body, Degrees::new(lon)));
        }
        positions
    }

    fn sun_only_detector() -> AspectDetector {
        AspectDetector::new(AspectTable::default(), vec![Body::Sun])
    }

    fn kind_between(transit: f64, natal: f64) -> Option<AspectKind> {
        let detector = sun_only_detector();
        let aspects = detector
            .detect_aspects(&set(&[(Body::Sun, transit)]), &set(&[(Body::Sun, natal)]))
            .unwrap();
        assert!(aspects.len() <= 1);
        aspects.first().map(|a| a.kind)
    }

    #[test]
    fn test_opposition_orb_edges() {
        assert_eq!(kind_between(10.0, 183.0), None);
        assert_eq!(kind_between(10.0, 184.0), None);
        assert_eq!(kind_between(10.0, 186.0), Some(AspectKind::Opposition));
    }

    #[test]
    fn test_conjunction_across_aries_point() {
        assert_eq!(kind_between(358.0, 2.0), Some(AspectKind::Conjunction));
    }

    #[test]
    fn test_square_and_trine() {
        assert_eq!(kind_between(0.0, 272.0), Some(AspectKind::Square));
        assert_eq!(kind_between(240.0, 0.0), Some(AspectKind::Trine));
        assert_eq!(kind_between(0.0, 60.0), None);
    }

    #[test]
    fn test_separation_is_reported() {
        let detector = sun_only_detector();
        let aspects = detector
            .detect_aspects(&set(&[(Body::Sun, 10.0)]), &set(&[(Body::Sun, 186.0)]))
            .unwrap();
        assert_eq!(aspects[0].separation.value(), 176.0);
        assert_eq!(aspects[0].orb(), 4.0);
    }

    #[test]
    fn test_output_is_transit_major_in_tracked_order() {
        let detector = AspectDetector::default();
        // every body at 0° in both sets: all 100 pairs are conjunctions
        let aspects = detector.detect_aspects(&set(&[]), &set(&[])).unwrap();
        assert_eq!(aspects.len(), 100);
        assert_eq!(aspects[0].transit_body, Body::Sun);
        assert_eq!(aspects[0].natal_body, Body::Sun);
        assert_eq!(aspects[1].natal_body, Body::Moon);
        assert_eq!(aspects[10].transit_body, Body::Moon);
        assert_eq!(aspects[10].natal_body, Body::Sun);
        assert_eq!(aspects[99].transit_body, Body::Pluto);
        assert_eq!(aspects[99].natal_body, Body::Pluto);
        assert!(aspects.iter().all(|a| a.kind == AspectKind::Conjunction));
    }

    #[test]
    fn test_missing_body_in_natal_set() {
        let detector = AspectDetector::default();
        let mut natal = set(&[]);
        natal.remove(&Body::Venus);
        let err = detector.detect_aspects(&set(&[]), &natal).unwrap_err();
        assert_eq!(err, ChartError::MissingBody { body: Body::Venus });
    }

    #[test]
    fn test_missing_body_in_transit_set() {
        let detector = AspectDetector::default();
        let mut transit = set(&[]);
        transit.remove(&Body::Sun);
        let err = detector.detect_aspects(&transit, &set(&[])).unwrap_err();
        assert_eq!(err, ChartError::MissingBody { body: Body::Sun });
    }

    #[test]
    fn test_extra_bodies_are_ignored() {
        let detector = sun_only_detector();
        let aspects = detector
            .detect_aspects(&set(&[(Body::Moon, 90.0)]), &set(&[]))
            .unwrap();
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].transit_body, Body::Sun);
    }
}
