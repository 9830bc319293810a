//! Low-precision analytic ephemeris.
//!
//! Planets move on circular, coplanar heliocentric orbits at their J2000 mean
//! longitudes and mean daily motions; geocentric longitude is the direction of
//! the Earth-to-planet vector, so stations and retrograde loops emerge from the
//! geometry. The Moon and the mean lunar node advance at their mean rates.
//! Positions are good to a few degrees, which is enough for offline runs,
//! benchmarks and deterministic tests; production charts use the Swiss
//! Ephemeris adapter.

use crate::ephemeris::provider::{EphemerisProvider, HouseCuspProvider};
use crate::ephemeris::types::{Body, BodyState, HouseFrame, HouseSystem};
use crate::error::EphemerisError;
use crate::time::J2000;
use crate::western::zodiac::normalize_degrees;

/// Mean obliquity of the ecliptic at J2000, degrees.
pub const MEAN_OBLIQUITY: f64 = 23.4393;

#[derive(Debug, Clone, Copy)]
struct MeanOrbit {
    /// Mean longitude at J2000, degrees
    longitude_j2000: f64,
    /// Mean daily motion, degrees/day
    daily_motion: f64,
    /// Semi-major axis, AU
    semi_major_axis: f64,
}

const EARTH: MeanOrbit = MeanOrbit {
    longitude_j2000: 100.46646,
    daily_motion: 0.985_647_36,
    semi_major_axis: 1.0,
};

const SUN_LONGITUDE_J2000: f64 = 280.46646;
const MOON_LONGITUDE_J2000: f64 = 218.3165;
const MOON_DAILY_MOTION: f64 = 13.176_396_48;
const NODE_LONGITUDE_J2000: f64 = 125.04452;
const NODE_DAILY_MOTION: f64 = -0.052_953_8;

fn orbit_for(body: Body) -> Option<MeanOrbit> {
    let (longitude_j2000, daily_motion, semi_major_axis) = match body {
        Body::Mercury => (252.250906, 4.092_338_8, 0.387_098),
        Body::Venus => (181.979801, 1.602_130_5, 0.723_330),
        Body::Mars => (355.433000, 0.524_032_9, 1.523_679),
        Body::Jupiter => (34.351519, 0.083_086_8, 5.202_603),
        Body::Saturn => (50.077444, 0.033_459_7, 9.554_910),
        Body::Uranus => (314.055005, 0.011_733_0, 19.218_446),
        Body::Neptune => (304.348665, 0.005_981_0, 30.110_387),
        Body::Pluto => (238.928810, 0.003_968_0, 39.482_117),
        _ => return None,
    };
    Some(MeanOrbit {
        longitude_j2000,
        daily_motion,
        semi_major_axis,
    })
}

/// Analytic provider for positions and Equal/Whole-Sign houses.
#[derive(Debug, Clone, Copy)]
pub struct MeanOrbitEphemeris {
    obliquity: f64,
}

impl MeanOrbitEphemeris {
    /// House systems this provider can compute.
    pub const HOUSE_SYSTEMS: [HouseSystem; 2] = [HouseSystem::Equal, HouseSystem::WholeSign];

    pub fn new() -> Self {
        Self {
            obliquity: MEAN_OBLIQUITY,
        }
    }

    /// Geocentric longitude and its rate for a planet on a circular orbit.
    fn geocentric(&self, orbit: MeanOrbit, days: f64) -> (f64, f64) {
        let lp = (orbit.longitude_j2000 + orbit.daily_motion * days).to_radians();
        let le = (EARTH.longitude_j2000 + EARTH.daily_motion * days).to_radians();
        let np = orbit.daily_motion.to_radians();
        let ne = EARTH.daily_motion.to_radians();
        let (ap, ae) = (orbit.semi_major_axis, EARTH.semi_major_axis);

        let x = ap * lp.cos() - ae * le.cos();
        let y = ap * lp.sin() - ae * le.sin();
        let dx = -ap * np * lp.sin() + ae * ne * le.sin();
        let dy = ap * np * lp.cos() - ae * ne * le.cos();

        let longitude = normalize_degrees(y.atan2(x).to_degrees());
        let speed = ((x * dy - y * dx) / (x * x + y * y)).to_degrees();
        (longitude, speed)
    }

    pub fn supports(system: HouseSystem) -> bool {
        Self::HOUSE_SYSTEMS.contains(&system)
    }

    /// Right ascension of the meridian for an east longitude, degrees.
    fn ramc(&self, jd: f64, lon: f64) -> f64 {
        let days = jd - J2000;
        normalize_degrees(280.460_618_37 + 360.985_647_366_29 * days + lon)
    }
}

impl Default for MeanOrbitEphemeris {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisProvider for MeanOrbitEphemeris {
    fn position_of(&self, body: Body, jd: f64) -> Result<BodyState, EphemerisError> {
        if !jd.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                julian_day: jd,
                message: "non-finite Julian Day".to_string(),
            });
        }
        let days = jd - J2000;
        let (longitude, speed) = match body {
            Body::Sun => (
                normalize_degrees(SUN_LONGITUDE_J2000 + EARTH.daily_motion * days),
                EARTH.daily_motion,
            ),
            Body::Moon => (
                normalize_degrees(MOON_LONGITUDE_J2000 + MOON_DAILY_MOTION * days),
                MOON_DAILY_MOTION,
            ),
            Body::NorthNode => (
                normalize_degrees(NODE_LONGITUDE_J2000 + NODE_DAILY_MOTION * days),
                NODE_DAILY_MOTION,
            ),
            planet => match orbit_for(planet) {
                Some(orbit) => self.geocentric(orbit, days),
                None => {
                    return Err(EphemerisError::CalculationFailed {
                        body,
                        julian_day: jd,
                        message: "no mean orbit for body".to_string(),
                    })
                }
            },
        };
        Ok(BodyState {
            longitude,
            latitude: 0.0,
            speed,
        })
    }
}

impl HouseCuspProvider for MeanOrbitEphemeris {
    fn cusps_for(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        let ramc = self.ramc(jd, lon).to_radians();
        let eps = self.obliquity.to_radians();
        let phi = lat.to_radians();

        let midheaven = normalize_degrees(ramc.sin().atan2(ramc.cos() * eps.cos()).to_degrees());
        let ascendant = normalize_degrees(
            ramc.cos()
                .atan2(-(ramc.sin() * eps.cos() + phi.tan() * eps.sin()))
                .to_degrees(),
        );

        let first = match system {
            HouseSystem::Equal => ascendant,
            HouseSystem::WholeSign => (ascendant / 30.0).floor() * 30.0,
            other => {
                return Err(EphemerisError::UnsupportedHouseSystem {
                    system: other.name().to_string(),
                    provider: "mean-orbit".to_string(),
                    supported: Self::HOUSE_SYSTEMS.iter().map(|h| h.name().to_string()).collect(),
                })
            }
        };
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = normalize_degrees(first + 30.0 * i as f64);
        }

        Ok(HouseFrame {
            cusps,
            ascendant,
            midheaven,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_near_equinox_in_march_2000() {
        let eph = MeanOrbitEphemeris::new();
        // 2000-03-21 12:00 UT
        let sun = eph.position_of(Body::Sun, 2_451_625.0).unwrap();
        let dist = sun.longitude.min(360.0 - sun.longitude);
        assert!(dist < 1.5, "sun at {}", sun.longitude);
    }

    #[test]
    fn test_saturn_retrogrades_at_opposition() {
        let eph = MeanOrbitEphemeris::new();
        let mut saw_retrograde = false;
        let mut saw_direct = false;
        for day in 0..400 {
            let state = eph.position_of(Body::Saturn, J2000 + day as f64).unwrap();
            if state.speed < 0.0 {
                saw_retrograde = true;
            } else {
                saw_direct = true;
            }
        }
        assert!(saw_retrograde && saw_direct);
    }

    #[test]
    fn test_equal_houses_start_at_ascendant() {
        let eph = MeanOrbitEphemeris::new();
        let frame = eph.cusps_for(J2000, 51.5, 0.0, HouseSystem::Equal).unwrap();
        assert!((frame.cusps[0] - frame.ascendant).abs() < 1e-9);
        assert!((normalize_degrees(frame.cusps[6] - frame.cusps[0]) - 180.0).abs() < 1e-9);
        assert!(eph.cusps_for(J2000, 51.5, 0.0, HouseSystem::Placidus).is_err());
    }

    #[test]
    fn test_unsupported_house_system_names_the_alternatives() {
        let eph = MeanOrbitEphemeris::new();
        let err = eph.cusps_for(J2000, 51.5, 0.0, HouseSystem::Placidus).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(HouseSystem::Equal.name()), "{}", message);
        assert!(message.contains(HouseSystem::WholeSign.name()), "{}", message);
        assert!(MeanOrbitEphemeris::supports(HouseSystem::WholeSign));
        assert!(!MeanOrbitEphemeris::supports(HouseSystem::Koch));
    }

    #[test]
    fn test_ascendant_is_ninety_from_meridian_at_equator() {
        let eph = MeanOrbitEphemeris {
            obliquity: 0.0,
        };
        let frame = eph.cusps_for(J2000, 0.0, 0.0, HouseSystem::Equal).unwrap();
        let diff = normalize_degrees(frame.ascendant - frame.midheaven);
        assert!((diff - 90.0).abs() < 1e-6, "diff {}", diff);
    }
}
