//! Essential dignities for traditional astrology.
//!
//! Classifies a body by the sign and degree it occupies: domicile, exaltation,
//! triplicity, term and face from the static tables, detriment and fall from
//! the opposite sign. The weight ordering here is shared by every scorer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::ephemeris::Body;
use crate::western::rulers::{domicile_ruler, exaltation_ruler, is_in_detriment, is_in_fall};
use crate::western::tables::{face_ruler, term_ruler, triplicity_ruler};
use crate::western::types::Sect;
use crate::western::zodiac::Sign;

/// Dignity labels, declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DignityLabel {
    Domicile,
    Exaltation,
    TriplicityDay,
    TriplicityNight,
    Term,
    Face,
    Detriment,
    Fall,
}

impl DignityLabel {
    pub fn name(&self) -> &'static str {
        match self {
            DignityLabel::Domicile => "domicile",
            DignityLabel::Exaltation => "exaltation",
            DignityLabel::TriplicityDay => "triplicity_day",
            DignityLabel::TriplicityNight => "triplicity_night",
            DignityLabel::Term => "term",
            DignityLabel::Face => "face",
            DignityLabel::Detriment => "detriment",
            DignityLabel::Fall => "fall",
        }
    }

    pub fn is_debility(&self) -> bool {
        matches!(self, DignityLabel::Detriment | DignityLabel::Fall)
    }

    /// Points toward the almuten of a degree; debilities score nothing.
    pub fn points(&self) -> u32 {
        match self {
            DignityLabel::Domicile => 5,
            DignityLabel::Exaltation => 4,
            DignityLabel::TriplicityDay | DignityLabel::TriplicityNight => 3,
            DignityLabel::Term => 2,
            DignityLabel::Face => 1,
            DignityLabel::Detriment | DignityLabel::Fall => 0,
        }
    }

    fn state(&self) -> EssentialState {
        match self {
            DignityLabel::Domicile => EssentialState::Domicile,
            DignityLabel::Exaltation => EssentialState::Exaltation,
            DignityLabel::TriplicityDay | DignityLabel::TriplicityNight => {
                EssentialState::Triplicity
            }
            DignityLabel::Term => EssentialState::Term,
            DignityLabel::Face => EssentialState::Face,
            DignityLabel::Detriment => EssentialState::Detriment,
            DignityLabel::Fall => EssentialState::Fall,
        }
    }
}

impl fmt::Display for DignityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dignity label: {0}")]
pub struct ParseLabelError(pub String);

impl FromStr for DignityLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        let label = match key.as_str() {
            "ruler" | "rulership" | "domicile" => DignityLabel::Domicile,
            "exaltation" | "exalted" => DignityLabel::Exaltation,
            "triplicity_day" => DignityLabel::TriplicityDay,
            "triplicity_night" => DignityLabel::TriplicityNight,
            "term" | "bound" => DignityLabel::Term,
            "face" | "decan" => DignityLabel::Face,
            "detriment" => DignityLabel::Detriment,
            "fall" => DignityLabel::Fall,
            _ => return Err(ParseLabelError(s.to_string())),
        };
        Ok(label)
    }
}

/// Dominant essential condition and its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EssentialState {
    Domicile,
    Exaltation,
    Triplicity,
    Term,
    Face,
    Peregrine,
    Detriment,
    Fall,
}

impl EssentialState {
    pub fn weight(&self) -> f64 {
        match self {
            EssentialState::Domicile => 2.0,
            EssentialState::Exaltation => 1.75,
            EssentialState::Triplicity => 1.5,
            EssentialState::Term => 1.25,
            EssentialState::Face => 1.1,
            EssentialState::Peregrine => 1.0,
            EssentialState::Detriment => 0.75,
            EssentialState::Fall => 0.5,
        }
    }

    pub fn is_debilitated(&self) -> bool {
        matches!(self, EssentialState::Detriment | EssentialState::Fall)
    }
}

/// Every dignity label `body` holds at a degree of a sign.
///
/// Only the triplicity lord of the chart's sect is credited.
pub fn dignities_of(body: Body, sign: Sign, degree_in_sign: f64, sect: Sect) -> BTreeSet<DignityLabel> {
    let mut labels = BTreeSet::new();
    if !body.is_classical() {
        return labels;
    }

    if domicile_ruler(sign) == body {
        labels.insert(DignityLabel::Domicile);
    }
    if exaltation_ruler(sign) == Some(body) {
        labels.insert(DignityLabel::Exaltation);
    }
    if triplicity_ruler(sign.element(), sect) == body {
        labels.insert(match sect {
            Sect::Diurnal => DignityLabel::TriplicityDay,
            Sect::Nocturnal => DignityLabel::TriplicityNight,
        });
    }
    if term_ruler(sign, degree_in_sign) == Some(body) {
        labels.insert(DignityLabel::Term);
    }
    if face_ruler(sign, degree_in_sign) == Some(body) {
        labels.insert(DignityLabel::Face);
    }
    if is_in_detriment(body, sign) {
        labels.insert(DignityLabel::Detriment);
    }
    if is_in_fall(body, sign) {
        labels.insert(DignityLabel::Fall);
    }
    labels
}

/// Weight of the highest-priority label; an empty set is peregrine.
pub fn dignity_weight<'a, I>(labels: I) -> (f64, EssentialState)
where
    I: IntoIterator<Item = &'a DignityLabel>,
{
    let mut dignity: Option<DignityLabel> = None;
    let mut debility: Option<DignityLabel> = None;
    for label in labels {
        let slot = if label.is_debility() {
            &mut debility
        } else {
            &mut dignity
        };
        if slot.map_or(true, |current| *label < current) {
            *slot = Some(*label);
        }
    }

    let state = match (dignity, debility) {
        (Some(label), _) => label.state(),
        (None, Some(label)) => label.state(),
        (None, None) => EssentialState::Peregrine,
    };
    (state.weight(), state)
}

/// Summed almuten points for `body` at a degree.
pub fn dignity_points(body: Body, sign: Sign, degree_in_sign: f64, sect: Sect) -> u32 {
    dignities_of(body, sign, degree_in_sign, sect)
        .iter()
        .map(DignityLabel::points)
        .sum()
}

/// Dignity classification attached to a chart position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DignityReport {
    pub labels: Vec<DignityLabel>,
    pub weight: f64,
    pub dominant: EssentialState,
}

impl DignityReport {
    pub fn evaluate(body: Body, sign: Sign, degree_in_sign: f64, sect: Sect) -> Self {
        let labels = dignities_of(body, sign, degree_in_sign, sect);
        let (weight, dominant) = dignity_weight(&labels);
        Self {
            labels: labels.into_iter().collect(),
            weight,
            dominant,
        }
    }

    pub fn has(&self, label: DignityLabel) -> bool {
        self.labels.contains(&label)
    }
}

/// Lords of each dignity at one degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeRulers {
    pub domicile: Body,
    pub exaltation: Option<Body>,
    pub triplicity: Body,
    pub term: Option<Body>,
    pub face: Option<Body>,
}

pub fn rulers_at(sign: Sign, degree_in_sign: f64, sect: Sect) -> DegreeRulers {
    DegreeRulers {
        domicile: domicile_ruler(sign),
        exaltation: exaltation_ruler(sign),
        triplicity: triplicity_ruler(sign.element(), sect),
        term: term_ruler(sign, degree_in_sign),
        face: face_ruler(sign, degree_in_sign),
    }
}
