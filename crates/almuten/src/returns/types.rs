use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aspects::Aspect;
use crate::chart::types::Chart;
use crate::ephemeris::Body;
use crate::search::BisectionConfig;

/// One exact return of a body to its natal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPass {
    pub julian_day: f64,
    pub instant: Option<DateTime<Utc>>,
    pub longitude: f64,
    pub retrograde: bool,
    /// 1-based position within the cycle
    pub sequence: u32,
}

/// All passes belonging to one return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnCycle {
    pub cycle: u32,
    pub passes: Vec<ReturnPass>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Years from birth to the first pass
    pub age_at_first_pass: f64,
}

impl ReturnCycle {
    pub fn first_julian_day(&self) -> Option<f64> {
        self.passes.first().map(|p| p.julian_day)
    }

    pub fn last_julian_day(&self) -> Option<f64> {
        self.passes.last().map(|p| p.julian_day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarSearchConfig {
    /// Half-width of the window around the anniversary, days
    pub window_days: f64,
    pub refine: BisectionConfig,
}

impl Default for SolarSearchConfig {
    fn default() -> Self {
        Self {
            window_days: 3.0,
            refine: BisectionConfig::new(1e-5, 1.0, 100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturnSearchConfig {
    /// Sidereal period, Julian years
    pub period_years: f64,
    /// Half-width of the first scan around each estimated return, days;
    /// the scan widens while a pass sits within a synodic period of its edge
    pub window_days: f64,
    pub step_days: f64,
    /// Passes closer than this are one pass
    pub dedup_days: f64,
    pub refine: BisectionConfig,
    pub max_cycles: u32,
}

impl Default for SaturnSearchConfig {
    fn default() -> Self {
        Self {
            period_years: 29.457,
            window_days: 400.0,
            step_days: 1.0,
            dedup_days: 1.5,
            refine: BisectionConfig::new(1e-3, 8.0, 100),
            max_cycles: 5,
        }
    }
}

/// Tuning for the return searches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnSearchConfig {
    pub solar: SolarSearchConfig,
    pub saturn: SaturnSearchConfig,
}

/// A return body's house in the return chart and in the natal chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseOverlay {
    pub body: Body,
    pub return_house: u8,
    pub natal_house: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnComparison {
    pub house_overlays: Vec<HouseOverlay>,
    /// Return-to-natal aspects, tightest first; `first` is the return body
    pub cross_aspects: Vec<Aspect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarReturnChart {
    pub year: i32,
    pub pass: ReturnPass,
    pub chart: Chart,
    pub comparison: ReturnComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturnReturnReport {
    pub natal_longitude: f64,
    pub natal_house: u8,
    pub as_of: DateTime<Utc>,
    pub past_cycles: Vec<ReturnCycle>,
    pub current_cycle: Option<ReturnCycle>,
    pub next_cycle: Option<ReturnCycle>,
    pub progress_percent: f64,
    pub days_until_next: Option<f64>,
}
