use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::aspects::{AspectCalculator, OrbTable};
use crate::chart::houses::house_for_longitude;
use crate::chart::lots::{compute_lots, LotInputs};
use crate::chart::syzygy::find_prenatal_syzygy;
use crate::chart::types::{Angles, Chart, HouseCusp, Lot, Position, Syzygy};
use crate::ephemeris::{Body, BodyState, EphemerisProvider, GeoLocation, HouseCuspProvider, HouseSystem};
use crate::error::ChartError;
use crate::time::{utc_from_julian_day, OffsetNormalizer, TimeNormalizer};
use crate::western::dignities::DignityReport;
use crate::western::types::Sect;
use crate::western::zodiac::{degree_in_sign, normalize_degrees, sign_of};

/// Birth moment and place as a caller supplies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// Local civil date and time
    pub datetime: NaiveDateTime,
    /// Timezone identifier understood by the time normalizer
    pub timezone: String,
    pub location: GeoLocation,
    /// `None` defers to the builder's [`ChartSettings::house_system`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_system: Option<HouseSystem>,
}

impl BirthData {
    pub fn new(datetime: NaiveDateTime, timezone: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            datetime,
            timezone: timezone.into(),
            location: GeoLocation::new(lat, lon),
            house_system: None,
        }
    }

    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = Some(system);
        self
    }
}

/// Settings for chart construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// House system for birth data that does not name one
    pub house_system: HouseSystem,
    pub orbs: OrbTable,
    pub include_minor_aspects: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            orbs: OrbTable::default(),
            include_minor_aspects: true,
        }
    }
}

static DEFAULT_NORMALIZER: OffsetNormalizer = OffsetNormalizer;

/// Assembles charts from an ephemeris and a house-cusp algorithm.
pub struct ChartBuilder<'a> {
    ephemeris: &'a dyn EphemerisProvider,
    houses: &'a dyn HouseCuspProvider,
    clock: &'a dyn TimeNormalizer,
    settings: ChartSettings,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(ephemeris: &'a dyn EphemerisProvider, houses: &'a dyn HouseCuspProvider) -> Self {
        Self {
            ephemeris,
            houses,
            clock: &DEFAULT_NORMALIZER,
            settings: ChartSettings::default(),
        }
    }

    pub fn with_time_normalizer(mut self, clock: &'a dyn TimeNormalizer) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn ephemeris(&self) -> &'a dyn EphemerisProvider {
        self.ephemeris
    }

    pub fn aspect_calculator(&self) -> AspectCalculator {
        AspectCalculator::new(self.settings.orbs.clone(), self.settings.include_minor_aspects)
    }

    /// Normalize the birth time and build the chart.
    pub fn build_chart(&self, birth: &BirthData) -> Result<Chart, ChartError> {
        birth.location.validate()?;
        let jd = self.clock.to_uniform_time(birth.datetime, &birth.timezone)?;
        let system = birth.house_system.unwrap_or(self.settings.house_system);
        self.build_chart_at(jd, birth.location, system)
    }

    /// Build the chart for a Julian Day (UT).
    pub fn build_chart_at(
        &self,
        jd: f64,
        location: GeoLocation,
        house_system: HouseSystem,
    ) -> Result<Chart, ChartError> {
        location.validate()?;
        if !jd.is_finite() {
            return Err(ChartError::InvalidDateTime(format!("Julian Day {}", jd)));
        }

        let frame = self.houses.cusps_for(jd, location.lat, location.lon, house_system)?;
        let ascendant = normalize_degrees(frame.ascendant);
        let midheaven = normalize_degrees(frame.midheaven);
        let cusps = match house_system {
            HouseSystem::WholeSign => {
                let first = sign_of(ascendant).start_longitude();
                std::array::from_fn::<f64, 12, _>(|i| normalize_degrees(first + 30.0 * i as f64))
            }
            _ => {
                let mut cusps = frame.cusps.map(normalize_degrees);
                cusps[0] = ascendant;
                cusps
            }
        };

        let mut states: Vec<(Body, BodyState)> = Vec::with_capacity(Body::ALL.len());
        for body in Body::ALL {
            states.push((body, self.ephemeris.position_of(body, jd)?));
        }
        let longitude_of = |body: Body| {
            states
                .iter()
                .find(|(b, _)| *b == body)
                .map_or(0.0, |(_, s)| normalize_degrees(s.longitude))
        };

        let sun = longitude_of(Body::Sun);
        let moon = longitude_of(Body::Moon);
        let sect = Sect::determine(sun, ascendant);

        let positions: Vec<Position> = states
            .iter()
            .map(|(body, state)| {
                let longitude = normalize_degrees(state.longitude);
                let sign = sign_of(longitude);
                let degree = degree_in_sign(longitude);
                Position {
                    body: *body,
                    longitude,
                    latitude: state.latitude,
                    speed: state.speed,
                    sign,
                    degree_in_sign: degree,
                    house: house_for_longitude(longitude, &cusps),
                    retrograde: state.speed < 0.0,
                    dignity: body
                        .is_classical()
                        .then(|| DignityReport::evaluate(*body, sign, degree, sect)),
                }
            })
            .collect();

        let aspects = self.aspect_calculator().compute_chart_aspects(&states);

        let lot_inputs = LotInputs {
            ascendant,
            sun,
            moon,
            venus: longitude_of(Body::Venus),
            mercury: longitude_of(Body::Mercury),
        };
        let lots = compute_lots(&lot_inputs, sect)
            .iter()
            .map(|(kind, longitude)| Lot {
                kind: *kind,
                longitude: *longitude,
                sign: sign_of(*longitude),
                degree_in_sign: degree_in_sign(*longitude),
                house: house_for_longitude(*longitude, &cusps),
            })
            .collect();

        let prenatal_syzygy = match find_prenatal_syzygy(self.ephemeris, jd)? {
            Some(event) => Some(Syzygy {
                kind: event.kind,
                julian_day: event.julian_day,
                longitude: event.moon_longitude,
                sign: sign_of(event.moon_longitude),
                degree_in_sign: degree_in_sign(event.moon_longitude),
                house: house_for_longitude(event.moon_longitude, &cusps),
            }),
            None => {
                log::warn!("prenatal syzygy not found before JD {:.5}", jd);
                None
            }
        };

        let houses = cusps
            .iter()
            .enumerate()
            .map(|(i, lon)| HouseCusp {
                house: (i + 1) as u8,
                longitude: *lon,
                sign: sign_of(*lon),
                degree: degree_in_sign(*lon),
            })
            .collect();

        log::debug!(
            "chart at JD {:.5} ({} houses, {:?}): asc {:.3}, {} aspects",
            jd, house_system, sect, ascendant, aspects.len()
        );

        Ok(Chart {
            julian_day: jd,
            instant: utc_from_julian_day(jd),
            location,
            house_system,
            houses,
            angles: Angles {
                ascendant,
                midheaven,
                descendant: normalize_degrees(ascendant + 180.0),
                imum_coeli: normalize_degrees(midheaven + 180.0),
            },
            sect,
            positions,
            aspects,
            lots,
            prenatal_syzygy,
        })
    }
}

/// Build a chart with default settings.
pub fn build_chart(
    ephemeris: &dyn EphemerisProvider,
    houses: &dyn HouseCuspProvider,
    birth: &BirthData,
) -> Result<Chart, ChartError> {
    ChartBuilder::new(ephemeris, houses).build_chart(birth)
}
