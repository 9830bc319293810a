//! Prenatal syzygy search.

use crate::chart::types::SyzygyKind;
use crate::ephemeris::{Body, EphemerisProvider};
use crate::error::EphemerisError;
use crate::search::{find_previous_crossing, BisectionConfig};
use crate::western::zodiac::normalize_degrees;

const STEP_DAYS: f64 = 0.5;
/// Longer than a synodic month
const MAX_SPAN_DAYS: f64 = 32.0;

/// A located new or full moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyzygyEvent {
    pub kind: SyzygyKind,
    pub julian_day: f64,
    pub moon_longitude: f64,
}

fn elongation(ephemeris: &dyn EphemerisProvider, jd: f64) -> Result<f64, EphemerisError> {
    let sun = ephemeris.longitude_of(Body::Sun, jd)?;
    let moon = ephemeris.longitude_of(Body::Moon, jd)?;
    Ok(normalize_degrees(moon - sun))
}

/// The last new or full moon before `jd`.
///
/// A waxing Moon (elongation under 180°) last met the Sun; a waning one was
/// last opposite it. `Ok(None)` if the backward search fails to converge.
pub fn find_prenatal_syzygy(
    ephemeris: &dyn EphemerisProvider,
    jd: f64,
) -> Result<Option<SyzygyEvent>, EphemerisError> {
    let (kind, target) = if elongation(ephemeris, jd)? < 180.0 {
        (SyzygyKind::NewMoon, 0.0)
    } else {
        (SyzygyKind::FullMoon, 180.0)
    };

    let config = BisectionConfig::new(1e-4, 1.0, 100);
    let crossing = find_previous_crossing(
        |t| elongation(ephemeris, t),
        target,
        jd,
        STEP_DAYS,
        MAX_SPAN_DAYS,
        &config,
    )?;

    match crossing {
        Some(crossing) => {
            let moon_longitude = ephemeris.longitude_of(Body::Moon, crossing.julian_day)?;
            log::debug!(
                "prenatal {:?} at JD {:.5}, moon {:.4}",
                kind, crossing.julian_day, moon_longitude
            );
            Ok(Some(SyzygyEvent {
                kind,
                julian_day: crossing.julian_day,
                moon_longitude,
            }))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::LinearEphemeris;
    use crate::western::zodiac::angular_separation;

    #[test]
    fn test_waxing_moon_finds_new_moon() {
        // elongation 30° and growing 12°/day: new moon 2.5 days earlier
        let eph = LinearEphemeris::new(100.0)
            .with(Body::Sun, 10.0, 1.0)
            .with(Body::Moon, 40.0, 13.0);
        let event = find_prenatal_syzygy(&eph, 100.0).unwrap().unwrap();
        assert_eq!(event.kind, SyzygyKind::NewMoon);
        assert!((event.julian_day - 97.5).abs() < 1e-4);
        let sun = eph.longitude_of(Body::Sun, event.julian_day).unwrap();
        assert!(angular_separation(sun, event.moon_longitude) < 1e-3);
    }

    #[test]
    fn test_waning_moon_finds_full_moon() {
        // elongation 210°: full moon 2.5 days earlier
        let eph = LinearEphemeris::new(0.0)
            .with(Body::Sun, 0.0, 1.0)
            .with(Body::Moon, 210.0, 13.0);
        let event = find_prenatal_syzygy(&eph, 0.0).unwrap().unwrap();
        assert_eq!(event.kind, SyzygyKind::FullMoon);
        assert!((event.julian_day + 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_birth_at_new_moon_is_its_own_syzygy() {
        let eph = LinearEphemeris::new(0.0)
            .with(Body::Sun, 10.0, 1.0)
            .with(Body::Moon, 10.0, 13.0);
        let event = find_prenatal_syzygy(&eph, 0.0).unwrap().unwrap();
        assert_eq!(event.kind, SyzygyKind::NewMoon);
        assert_eq!(event.julian_day, 0.0);
        assert_eq!(event.moon_longitude, 10.0);
    }
}
