use crate::ephemeris::types::{Body, BodyState, HouseFrame, HouseSystem};
use crate::error::EphemerisError;

/// Source of ecliptic positions. Implementations must be deterministic.
pub trait EphemerisProvider {
    /// Longitude, latitude and longitude speed of `body` at Julian Day `jd` (UT).
    fn position_of(&self, body: Body, jd: f64) -> Result<BodyState, EphemerisError>;

    /// Longitude only; the root finders call this in their inner loops.
    fn longitude_of(&self, body: Body, jd: f64) -> Result<f64, EphemerisError> {
        self.position_of(body, jd).map(|state| state.longitude)
    }
}

/// House-cusp algorithm for a moment and a place.
pub trait HouseCuspProvider {
    fn cusps_for(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;
}
