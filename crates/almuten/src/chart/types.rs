use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aspects::Aspect;
use crate::ephemeris::{Body, BodyState, GeoLocation, HouseSystem};
use crate::western::dignities::DignityReport;
use crate::western::types::Sect;
use crate::western::zodiac::Sign;

/// A body's placement in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub body: Body,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    pub latitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    pub sign: Sign,
    /// Degree within the sign (0-30)
    pub degree_in_sign: f64,
    /// House 1-12
    pub house: u8,
    pub retrograde: bool,
    /// Essential dignity, classical bodies only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dignity: Option<DignityReport>,
}

impl Position {
    pub fn state(&self) -> BodyState {
        BodyState {
            longitude: self.longitude,
            latitude: self.latitude,
            speed: self.speed,
        }
    }

    /// Dignity weight, 1.0 (peregrine) for bodies without a report.
    pub fn dignity_weight(&self) -> f64 {
        self.dignity.as_ref().map_or(1.0, |d| d.weight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number 1-12
    pub house: u8,
    pub longitude: f64,
    pub sign: Sign,
    pub degree: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotKind {
    Fortune,
    Spirit,
    Eros,
    Necessity,
}

impl LotKind {
    pub const ALL: [LotKind; 4] = [LotKind::Fortune, LotKind::Spirit, LotKind::Eros, LotKind::Necessity];
}

/// An Arabic Part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub kind: LotKind,
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub house: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyzygyKind {
    NewMoon,
    FullMoon,
}

/// The last new or full moon before the chart's moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Syzygy {
    pub kind: SyzygyKind,
    pub julian_day: f64,
    /// Moon's longitude at the event
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub house: u8,
}

/// Everything computed for one moment and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Julian Day (UT)
    pub julian_day: f64,
    pub instant: Option<DateTime<Utc>>,
    pub location: GeoLocation,
    pub house_system: HouseSystem,
    pub houses: Vec<HouseCusp>,
    pub angles: Angles,
    pub sect: Sect,
    pub positions: Vec<Position>,
    pub aspects: Vec<Aspect>,
    pub lots: Vec<Lot>,
    pub prenatal_syzygy: Option<Syzygy>,
}

impl Chart {
    pub fn position(&self, body: Body) -> Option<&Position> {
        self.positions.iter().find(|p| p.body == body)
    }

    pub fn lot(&self, kind: LotKind) -> Option<&Lot> {
        self.lots.iter().find(|l| l.kind == kind)
    }

    /// House containing a longitude, with this chart's cusps.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let cusps: Vec<f64> = self.houses.iter().map(|h| h.longitude).collect();
        crate::chart::houses::house_for_longitude(longitude, &cusps)
    }

    pub fn aspects_of(&self, body: Body) -> impl Iterator<Item = &Aspect> + '_ {
        self.aspects.iter().filter(move |a| a.involves(body))
    }

    pub fn aspect_between(&self, a: Body, b: Body) -> Option<&Aspect> {
        self.aspects.iter().find(|x| x.between(a, b))
    }

    /// Classical bodies with their states, in canonical order.
    pub fn classical_positions(&self) -> impl Iterator<Item = &Position> + '_ {
        self.positions.iter().filter(|p| p.body.is_classical())
    }

    pub fn body_states(&self) -> Vec<(Body, BodyState)> {
        self.positions.iter().map(|p| (p.body, p.state())).collect()
    }
}
