use std::env;
use std::path::{Path, PathBuf};

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::ephemeris::provider::{EphemerisProvider, HouseCuspProvider};
use crate::ephemeris::types::{Body, BodyState, HouseFrame, HouseSystem};
use crate::error::EphemerisError;
use crate::western::zodiac::normalize_degrees;

// Swiss Ephemeris planet IDs: SUN=0 .. PLUTO=9, TRUE_NODE=11
const PLANET_IDS: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
    (Body::NorthNode, 11),
];

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;
const SWISS_FLAGS: i32 = FLG_SWIEPH | FLG_SPEED;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then to the system data directory.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_str = path.to_string_lossy();
        if path_str.contains('\0') {
            return Err(EphemerisError::FileNotFound {
                path: path_str.replace('\0', "\\0"),
                message: "Ephemeris path contains a NUL byte".to_string(),
            });
        }
        set_ephe_path(&path_str);

        log::debug!("Swiss Ephemeris data directory: {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

fn planet_code(body: Body) -> i32 {
    PLANET_IDS
        .iter()
        .find(|(b, _)| *b == body)
        .map(|(_, code)| *code)
        .unwrap_or(0)
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position_of(&self, body: Body, jd: f64) -> Result<BodyState, EphemerisError> {
        let result = calc_ut(jd, planet_code(body) as u32, SWISS_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                julian_day: jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        if result.code & FLG_SWIEPH == 0 {
            log::debug!(
                "{} at JD {:.5}: no data files under {}, Moshier fallback",
                body, jd, self.ephemeris_path.display()
            );
        }
        let out = result.out;
        Ok(BodyState {
            longitude: normalize_degrees(out[0]),
            latitude: out[1],
            speed: out[3],
        })
    }
}

impl HouseCuspProvider for SwissEphemerisAdapter {
    fn cusps_for(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        let (c, a) = houses_ex(jd, SWISS_FLAGS, lat, lon, system.swiss_code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if values.iter().any(|v| !v.is_finite()) || !ascmc.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} cusps undefined at latitude {}", system, lat),
            });
        }

        Ok(HouseFrame {
            cusps: values.map(normalize_degrees),
            ascendant: normalize_degrees(ascmc.ascendant),
            midheaven: normalize_degrees(ascmc.mc),
        })
    }
}
