//! Body positions and house cusps for one instant.

use std::collections::BTreeMap;
use std::sync::Arc;

use qtty::Degrees;

use crate::error::{ChartError, ChartResult};
use crate::models::zodiac::normalize_longitude;
use crate::models::{Body, BodyPosition, GeoCoordinate, JulianDay, SignPlacement};
use crate::providers::{EphemerisProvider, HouseCusps, HouseSystem};

/// Raw longitudes keyed by body, iterating in tracked-body order.
pub type PositionSet = BTreeMap<Body, BodyPosition>;

/// Asks the ephemeris for body longitudes and derives sign placements.
#[derive(Clone)]
pub struct PositionResolver {
    ephemeris: Arc<dyn EphemerisProvider>,
    house_system: HouseSystem,
}

impl PositionResolver {
    pub fn new(ephemeris: Arc<dyn EphemerisProvider>, house_system: HouseSystem) -> Self {
        Self {
            ephemeris,
            house_system,
        }
    }

    pub fn ephemeris_name(&self) -> &'static str {
        self.ephemeris.name()
    }

    /// Longitude of a single body, reduced into `[0, 360)`.
    fn body_position(&self, body: Body, instant: JulianDay) -> ChartResult<BodyPosition> {
        let raw = self.ephemeris.longitude(body, instant)?;
        if !raw.value().is_finite() {
            return Err(ChartError::ephemeris_body(
                body,
                instant.value(),
                "provider returned a non-finite longitude",
            ));
        }
        Ok(BodyPosition::new(body, raw))
    }

    /// Raw positions of `bodies` at `instant`.
    ///
    /// # Returns
    /// * `Ok(PositionSet)` - One entry per requested body
    /// * `Err(ChartError::EphemerisUnavailable)` - First body the ephemeris cannot answer for
    pub fn resolve_positions(&self, instant: JulianDay, bodies: &[Body]) -> ChartResult<PositionSet> {
        let mut positions = BTreeMap::new();
        for &body in bodies {
            let position = self.body_position(body, instant)?;
            log::debug!(
                "{} at JD {:.5}: {:.4}°",
                body,
                instant.value(),
                position.longitude.value()
            );
            positions.insert(body, position);
        }
        Ok(positions)
    }

    /// Sign placements of `bodies` at `instant`.
    ///
    /// Longitudes are geocentric, so the coordinate does not change the result;
    /// it is accepted to keep the call shape of the ephemeris boundary.
    pub fn resolve(
        &self,
        instant: JulianDay,
        _coordinate: Option<GeoCoordinate>,
        bodies: &[Body],
    ) -> ChartResult<BTreeMap<Body, SignPlacement>> {
        Ok(self
            .resolve_positions(instant, bodies)?
            .into_iter()
            .map(|(body, position)| (body, position.placement()))
            .collect())
    }

    /// House cusps at `instant` for an observer, in the configured system.
    pub fn resolve_houses(&self, instant: JulianDay, coordinate: GeoCoordinate) -> ChartResult<HouseCusps> {
        let raw = self
            .ephemeris
            .house_cusps(instant, coordinate, self.house_system)?;
        let mut cusps = [Degrees::new(0.0); 12];
        for (slot, cusp) in cusps.iter_mut().zip(raw.iter()) {
            if !cusp.value().is_finite() {
                return Err(ChartError::ephemeris(
                    "house cusps",
                    instant.value(),
                    "provider returned a non-finite cusp",
                ));
            }
            *slot = Degrees::new(normalize_longitude(cusp.value()));
        }
        Ok(HouseCusps {
            system: self.house_system,
            cusps,
        })
    }
}
