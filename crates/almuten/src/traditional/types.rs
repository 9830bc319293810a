use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aspects::AspectKind;
use crate::ephemeris::Body;
use crate::western::dignities::DignityLabel;
use crate::western::types::Sect;
use crate::western::zodiac::Sign;

/// Points tested for the Hyleg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HylegCandidate {
    Sun,
    Moon,
    Ascendant,
    PartOfFortune,
    PrenatalSyzygy,
}

impl HylegCandidate {
    /// Evaluation order: the luminary of the sect leads.
    pub fn order(sect: Sect) -> [HylegCandidate; 5] {
        let (primary, secondary) = match sect {
            Sect::Diurnal => (HylegCandidate::Sun, HylegCandidate::Moon),
            Sect::Nocturnal => (HylegCandidate::Moon, HylegCandidate::Sun),
        };
        [
            primary,
            secondary,
            HylegCandidate::Ascendant,
            HylegCandidate::PartOfFortune,
            HylegCandidate::PrenatalSyzygy,
        ]
    }

    /// The body behind this candidate, if it is a body.
    pub fn body(&self) -> Option<Body> {
        match self {
            HylegCandidate::Sun => Some(Body::Sun),
            HylegCandidate::Moon => Some(Body::Moon),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HylegCandidate::Sun => "sun",
            HylegCandidate::Moon => "moon",
            HylegCandidate::Ascendant => "ascendant",
            HylegCandidate::PartOfFortune => "part_of_fortune",
            HylegCandidate::PrenatalSyzygy => "prenatal_syzygy",
        }
    }
}

impl fmt::Display for HylegCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a candidate sits in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointPlacement {
    pub longitude: f64,
    /// Daily motion; zero for points without one
    pub speed: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub house: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationRule {
    /// Aspected by the lord of its sign
    DomicileRuler,
    /// Aspected by one of the prorogatory bodies
    Prorogatory,
}

/// The aspect that qualified a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualifyingAspect {
    pub rule: QualificationRule,
    pub body: Body,
    pub kind: AspectKind,
    pub orb: f64,
}

/// Outcome of testing one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateStatus {
    Qualified { qualification: QualifyingAspect },
    NotInHylegicalPlace { house: u8 },
    NoQualifyingAspect { aspected_by: Vec<Body> },
    NoAspect,
    Unavailable { reason: String },
}

impl CandidateStatus {
    pub fn is_qualified(&self) -> bool {
        matches!(self, CandidateStatus::Qualified { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub candidate: HylegCandidate,
    pub placement: Option<PointPlacement>,
    pub status: CandidateStatus,
}

/// The selected Hyleg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyleg {
    pub candidate: HylegCandidate,
    pub placement: PointPlacement,
    pub qualification: QualifyingAspect,
}

/// Hyleg determination with its full evaluation trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HylegResult {
    pub sect: Sect,
    pub hyleg: Option<Hyleg>,
    pub evaluations: Vec<CandidateEvaluation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearsTier {
    Minor,
    Middle,
    Major,
}

/// Why a body did or did not qualify as Alcochoden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcochodenStatus {
    Qualified,
    IsHyleg,
    NoDignity,
    NoAspect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlcochodenCandidate {
    pub body: Body,
    /// Dignities held at the Hyleg's degree
    pub dignities: Vec<DignityLabel>,
    pub points: u32,
    pub aspect: Option<AspectKind>,
    pub orb: Option<f64>,
    pub status: AlcochodenStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum YearsModifier {
    Angular { house: u8, years: f64 },
    Succedent { house: u8, years: f64 },
    Cadent { house: u8, years: f64 },
    BeneficAspect { body: Body, kind: AspectKind, years: f64 },
    MaleficAspect { body: Body, kind: AspectKind, years: f64 },
}

impl YearsModifier {
    pub fn years(&self) -> f64 {
        match self {
            YearsModifier::Angular { years, .. }
            | YearsModifier::Succedent { years, .. }
            | YearsModifier::Cadent { years, .. }
            | YearsModifier::BeneficAspect { years, .. }
            | YearsModifier::MaleficAspect { years, .. } => *years,
        }
    }
}

/// The selected Alcochoden and its years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alcochoden {
    pub body: Body,
    pub points: u32,
    pub tier: YearsTier,
    pub base_years: f64,
    pub modifiers: Vec<YearsModifier>,
    /// Base plus modifiers, never below zero
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlcochodenResult {
    pub hyleg: Option<HylegCandidate>,
    pub alcochoden: Option<Alcochoden>,
    pub candidates: Vec<AlcochodenCandidate>,
}
