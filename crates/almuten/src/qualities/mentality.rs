//! Mentality scores from Mercury's condition.

use serde::{Deserialize, Serialize};

use crate::aspects::AspectKind;
use crate::chart::houses::is_cadent;
use crate::chart::types::{Chart, Position};
use crate::ephemeris::Body;
use crate::western::dignities::DignityLabel;
use crate::western::zodiac::{Element, Modality};

/// The body that rules communication and cognition.
pub const COGNITION_RULER: Body = Body::Mercury;

pub const STRENGTH_RANGE: (f64, f64) = (0.0, 100.0);
pub const SPEED_RANGE: (f64, f64) = (-15.0, 20.0);
pub const DEPTH_RANGE: (f64, f64) = (0.0, 25.0);
pub const VERSATILITY_RANGE: (f64, f64) = (0.0, 20.0);

const HIGH_VERSATILITY: f64 = 14.0;
const LOW_VERSATILITY: f64 = 6.0;
const DEEP: f64 = 15.0;
const SHALLOW: f64 = 8.0;
const FAST: f64 = 10.0;
const SLOW: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentalityType {
    Abstract,
    Concrete,
    Versatile,
    Specialized,
    FastDeep,
    FastShallow,
    SlowDeep,
    SlowShallow,
    Fast,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentalityAxis {
    Strength,
    Speed,
    Depth,
    Versatility,
}

/// One contribution to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub axis: MentalityAxis,
    pub source: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalityResult {
    pub ruler: Body,
    pub strength: f64,
    pub speed: f64,
    pub depth: f64,
    pub versatility: f64,
    pub mentality_type: MentalityType,
    pub strong_houses: Vec<u8>,
    pub contributions: Vec<ScoreContribution>,
}

struct Tally {
    contributions: Vec<ScoreContribution>,
}

impl Tally {
    fn add(&mut self, axis: MentalityAxis, source: impl Into<String>, points: f64) {
        if points != 0.0 {
            self.contributions.push(ScoreContribution {
                axis,
                source: source.into(),
                points,
            });
        }
    }

    fn total(&self, axis: MentalityAxis, base: f64, range: (f64, f64)) -> f64 {
        let sum: f64 = self
            .contributions
            .iter()
            .filter(|c| c.axis == axis)
            .map(|c| c.points)
            .sum();
        (base + sum).clamp(range.0, range.1)
    }
}

/// Houses holding Mercury or at least two classical bodies.
fn strong_houses(chart: &Chart, mercury: &Position) -> Vec<u8> {
    (1..=12u8)
        .filter(|house| {
            let count = chart.classical_positions().filter(|p| p.house == *house).count();
            mercury.house == *house || count >= 2
        })
        .collect()
}

fn classify(
    mercury: &Position,
    strong: &[u8],
    speed: f64,
    depth: f64,
    versatility: f64,
) -> MentalityType {
    let element = mercury.sign.element();
    let (fast, slow) = (speed >= FAST, speed <= SLOW);
    let (deep, shallow) = (depth >= DEEP, depth <= SHALLOW);

    if strong.contains(&9) && element == Element::Air {
        MentalityType::Abstract
    } else if strong.contains(&3) && element == Element::Earth {
        MentalityType::Concrete
    } else if versatility >= HIGH_VERSATILITY {
        MentalityType::Versatile
    } else if versatility <= LOW_VERSATILITY && deep {
        MentalityType::Specialized
    } else if fast && deep {
        MentalityType::FastDeep
    } else if fast && shallow {
        MentalityType::FastShallow
    } else if slow && deep {
        MentalityType::SlowDeep
    } else if slow && shallow {
        MentalityType::SlowShallow
    } else if fast {
        MentalityType::Fast
    } else if deep {
        MentalityType::Deep
    } else {
        MentalityType::Versatile
    }
}

/// Score Mercury and classify the mentality.
///
/// `None` when the chart has no Mercury position.
pub fn compute_mentality(chart: &Chart) -> Option<MentalityResult> {
    use MentalityAxis::{Depth, Speed, Strength, Versatility};

    let mercury = chart.position(COGNITION_RULER)?;
    let mut tally = Tally {
        contributions: Vec::new(),
    };
    let element = mercury.sign.element();

    // strength
    let weight = mercury.dignity_weight();
    tally.add(Strength, "dignity", (weight - 1.0) * 20.0);
    for aspect in chart.aspects_of(COGNITION_RULER) {
        let Some(other) = aspect.other(COGNITION_RULER) else {
            continue;
        };
        if other.is_benefic() {
            tally.add(Strength, format!("{} {}", other, aspect.kind), 5.0);
        }
        if other == Body::Moon && aspect.kind.is_harmonious() {
            tally.add(Strength, format!("moon {}", aspect.kind), 5.0);
        }
        if other.is_malefic() && matches!(aspect.kind, AspectKind::Square | AspectKind::Opposition) {
            tally.add(Strength, format!("{} {}", other, aspect.kind), -5.0);
        }
    }
    if matches!(mercury.house, 1 | 3 | 9 | 10 | 11) {
        tally.add(Strength, format!("house {}", mercury.house), 5.0);
    }

    // speed
    let speed_by_element = match element {
        Element::Fire => 10.0,
        Element::Air => 8.0,
        Element::Water => 0.0,
        Element::Earth => -5.0,
    };
    tally.add(Speed, format!("{:?} sign", element).to_lowercase(), speed_by_element);
    for aspect in chart.aspects_of(COGNITION_RULER) {
        if let Some(other @ (Body::Mars | Body::Uranus)) = aspect.other(COGNITION_RULER) {
            tally.add(Speed, format!("{} {}", other, aspect.kind), 5.0);
        }
    }
    if mercury.retrograde {
        tally.add(Speed, "retrograde", -10.0);
    } else {
        tally.add(Speed, "direct", 5.0);
    }

    // depth
    let depth_by_element = match element {
        Element::Water => 10.0,
        Element::Earth => 8.0,
        Element::Air => 3.0,
        Element::Fire => 0.0,
    };
    tally.add(Depth, format!("{:?} sign", element).to_lowercase(), depth_by_element);
    for aspect in chart.aspects_of(COGNITION_RULER) {
        if let Some(other @ (Body::Saturn | Body::Pluto)) = aspect.other(COGNITION_RULER) {
            tally.add(Depth, format!("{} {}", other, aspect.kind), 5.0);
        }
    }
    if matches!(mercury.house, 4 | 8 | 12) {
        tally.add(Depth, format!("house {}", mercury.house), 5.0);
    }
    let dignified = mercury.dignity.as_ref().map_or(false, |d| {
        d.has(DignityLabel::Domicile) || d.has(DignityLabel::Exaltation)
    });
    if dignified {
        tally.add(Depth, "domicile or exaltation", 5.0);
    }

    // versatility
    if mercury.sign.modality() == Modality::Mutable {
        tally.add(Versatility, "mutable sign", 8.0);
    }
    let aspect_count = chart.aspects_of(COGNITION_RULER).count();
    if aspect_count >= 4 {
        tally.add(Versatility, format!("{} aspects", aspect_count), 6.0);
    }
    let cadent = chart.classical_positions().filter(|p| is_cadent(p.house)).count();
    if cadent >= 4 {
        tally.add(Versatility, format!("{} bodies cadent", cadent), 6.0);
    }

    let strength = tally.total(Strength, 50.0, STRENGTH_RANGE);
    let speed = tally.total(Speed, 0.0, SPEED_RANGE);
    let depth = tally.total(Depth, 0.0, DEPTH_RANGE);
    let versatility = tally.total(Versatility, 0.0, VERSATILITY_RANGE);

    let strong = strong_houses(chart, mercury);
    let mentality_type = classify(mercury, &strong, speed, depth, versatility);
    log::debug!(
        "mentality {:?}: strength {:.1} speed {:.1} depth {:.1} versatility {:.1}",
        mentality_type, strength, speed, depth, versatility
    );

    Some(MentalityResult {
        ruler: COGNITION_RULER,
        strength,
        speed,
        depth,
        versatility,
        mentality_type,
        strong_houses: strong,
        contributions: tally.contributions,
    })
}
