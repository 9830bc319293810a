//! Providers over externally computed positions.
//!
//! When positions arrive from another service, [`LinearEphemeris`] serves them
//! back through the provider trait, extrapolating each body linearly from its
//! epoch state. [`FixedHouses`] does the same for a precomputed cusp frame.

use crate::ephemeris::provider::{EphemerisProvider, HouseCuspProvider};
use crate::ephemeris::types::{Body, BodyState, HouseFrame, HouseSystem};
use crate::error::EphemerisError;
use crate::western::zodiac::normalize_degrees;

#[derive(Debug, Clone)]
pub struct LinearEphemeris {
    epoch: f64,
    states: Vec<(Body, BodyState)>,
}

impl LinearEphemeris {
    pub fn new(epoch: f64) -> Self {
        Self {
            epoch,
            states: Vec::new(),
        }
    }

    /// Set a body's longitude and daily speed at the epoch.
    pub fn with(mut self, body: Body, longitude: f64, speed: f64) -> Self {
        let state = BodyState {
            longitude: normalize_degrees(longitude),
            latitude: 0.0,
            speed,
        };
        match self.states.iter_mut().find(|(b, _)| *b == body) {
            Some(slot) => slot.1 = state,
            None => self.states.push((body, state)),
        }
        self
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }
}

impl EphemerisProvider for LinearEphemeris {
    fn position_of(&self, body: Body, jd: f64) -> Result<BodyState, EphemerisError> {
        let (_, state) = self
            .states
            .iter()
            .find(|(b, _)| *b == body)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                julian_day: jd,
                message: "body not supplied to linear ephemeris".to_string(),
            })?;
        Ok(BodyState {
            longitude: normalize_degrees(state.longitude + state.speed * (jd - self.epoch)),
            latitude: state.latitude,
            speed: state.speed,
        })
    }
}

/// Returns the same cusp frame for every query.
#[derive(Debug, Clone, Copy)]
pub struct FixedHouses {
    frame: HouseFrame,
}

impl FixedHouses {
    pub fn new(frame: HouseFrame) -> Self {
        Self { frame }
    }

    /// Equal houses from an Ascendant; the Midheaven sits 90° behind it.
    pub fn equal(ascendant: f64) -> Self {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = normalize_degrees(ascendant + 30.0 * i as f64);
        }
        Self {
            frame: HouseFrame {
                cusps,
                ascendant: normalize_degrees(ascendant),
                midheaven: normalize_degrees(ascendant - 90.0),
            },
        }
    }
}

impl HouseCuspProvider for FixedHouses {
    fn cusps_for(
        &self,
        _jd: f64,
        _lat: f64,
        _lon: f64,
        _system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        Ok(self.frame)
    }
}
