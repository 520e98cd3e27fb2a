//! Geocoding provider trait.

use async_trait::async_trait;

use crate::error::ChartResult;
use crate::models::GeoLocation;

/// Resolves free-text locations to coordinates and a timezone.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Look up a location.
    ///
    /// # Arguments
    /// * `location` - Free text as typed by the user, e.g. "Istanbul, Turkey"
    ///
    /// # Returns
    /// * `Ok(GeoLocation)` - Coordinates, IANA timezone name and canonical name
    /// * `Err(ChartError::LocationNotFound)` - No match for the text
    /// * `Err(ChartError::Geocoding)` - The service failed or answered unexpectedly
    async fn lookup(&self, location: &str) -> ChartResult<GeoLocation>;

    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &'static str;
}
