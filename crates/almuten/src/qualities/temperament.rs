//! Temperament from the elemental qualities of five chart factors.

use serde::{Deserialize, Serialize};

use crate::chart::types::Chart;
use crate::ephemeris::Body;
use crate::western::dignities::dignity_points;
use crate::western::rulers::domicile_ruler;
use crate::western::zodiac::{degree_in_sign, normalize_degrees, sign_of, Element, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperament {
    Sanguine,
    Choleric,
    Phlegmatic,
    Melancholic,
}

impl Temperament {
    pub fn from_qualities(hot: bool, wet: bool) -> Self {
        match (hot, wet) {
            (true, true) => Temperament::Sanguine,
            (true, false) => Temperament::Choleric,
            (false, true) => Temperament::Phlegmatic,
            (false, false) => Temperament::Melancholic,
        }
    }
}

/// A hot/cold and wet/dry pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualities {
    pub hot: bool,
    pub wet: bool,
}

impl Qualities {
    const fn new(hot: bool, wet: bool) -> Self {
        Self { hot, wet }
    }
}

pub fn element_qualities(element: Element) -> Qualities {
    match element {
        Element::Fire => Qualities::new(true, false),
        Element::Air => Qualities::new(true, true),
        Element::Water => Qualities::new(false, true),
        Element::Earth => Qualities::new(false, false),
    }
}

/// Nature of a classical body; `None` for the others.
pub fn body_qualities(body: Body) -> Option<Qualities> {
    match body {
        Body::Sun | Body::Mars => Some(Qualities::new(true, false)),
        Body::Moon | Body::Venus => Some(Qualities::new(false, true)),
        Body::Mercury | Body::Saturn => Some(Qualities::new(false, false)),
        Body::Jupiter => Some(Qualities::new(true, true)),
        _ => None,
    }
}

/// Season of the Sun's sign: spring, summer, autumn, winter.
pub fn season_qualities(sun_sign: Sign) -> Qualities {
    match sun_sign.index() / 3 {
        0 => Qualities::new(true, true),
        1 => Qualities::new(true, false),
        2 => Qualities::new(false, false),
        _ => Qualities::new(false, true),
    }
}

/// Quarter of the Moon's elongation from the Sun.
pub fn lunar_phase_qualities(elongation: f64) -> Qualities {
    match (normalize_degrees(elongation) / 90.0).floor() as u8 {
        0 => Qualities::new(true, true),
        1 => Qualities::new(true, false),
        2 => Qualities::new(false, false),
        _ => Qualities::new(false, true),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperamentFactorKind {
    AscendantSign,
    AscendantRuler,
    SolarSeason,
    LunarPhase,
    LordOfNativity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperamentFactor {
    pub kind: TemperamentFactorKind,
    /// Sign or body the qualities came from
    pub source: String,
    pub qualities: Qualities,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityScores {
    pub hot: f64,
    pub cold: f64,
    pub wet: f64,
    pub dry: f64,
}

impl QualityScores {
    fn add(&mut self, qualities: Qualities, weight: f64) {
        if qualities.hot {
            self.hot += weight;
        } else {
            self.cold += weight;
        }
        if qualities.wet {
            self.wet += weight;
        } else {
            self.dry += weight;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperamentResult {
    pub temperament: Temperament,
    pub scores: QualityScores,
    pub factors: Vec<TemperamentFactor>,
    pub ascendant_ruler: Body,
    pub lord_of_nativity: Body,
}

/// Classical body with the most dignity points at the Ascendant degree.
///
/// Ties go to the Ascendant's domicile lord, then to body order.
pub fn lord_of_nativity(chart: &Chart) -> Body {
    let asc = chart.angles.ascendant;
    let sign = sign_of(asc);
    let degree = degree_in_sign(asc);
    let ruler = domicile_ruler(sign);

    let mut best = ruler;
    let mut best_points = dignity_points(ruler, sign, degree, chart.sect);
    for body in Body::CLASSICAL {
        let points = dignity_points(body, sign, degree, chart.sect);
        if points > best_points {
            best = body;
            best_points = points;
        }
    }
    best
}

fn body_factor(kind: TemperamentFactorKind, body: Body, chart: &Chart) -> Option<TemperamentFactor> {
    let qualities = body_qualities(body)?;
    let weight = chart.position(body).map_or(1.0, |p| p.dignity_weight());
    Some(TemperamentFactor {
        kind,
        source: body.name().to_string(),
        qualities,
        weight,
    })
}

/// Tally the five factors and classify.
///
/// Hot wins only when strictly greater than cold, and wet only when strictly
/// greater than dry, so exact ties come out cold and dry.
pub fn compute_temperament(chart: &Chart) -> TemperamentResult {
    let asc_sign = sign_of(chart.angles.ascendant);
    let ascendant_ruler = domicile_ruler(asc_sign);
    let lord = lord_of_nativity(chart);

    let mut factors = vec![TemperamentFactor {
        kind: TemperamentFactorKind::AscendantSign,
        source: asc_sign.name().to_string(),
        qualities: element_qualities(asc_sign.element()),
        weight: 1.0,
    }];
    factors.extend(body_factor(TemperamentFactorKind::AscendantRuler, ascendant_ruler, chart));

    match (chart.position(Body::Sun), chart.position(Body::Moon)) {
        (Some(sun), Some(moon)) => {
            factors.push(TemperamentFactor {
                kind: TemperamentFactorKind::SolarSeason,
                source: sun.sign.name().to_string(),
                qualities: season_qualities(sun.sign),
                weight: 1.0,
            });
            let elongation = normalize_degrees(moon.longitude - sun.longitude);
            factors.push(TemperamentFactor {
                kind: TemperamentFactorKind::LunarPhase,
                source: format!("{:.2}", elongation),
                qualities: lunar_phase_qualities(elongation),
                weight: 1.0,
            });
        }
        _ => log::warn!("luminaries missing; solar and lunar factors skipped"),
    }
    factors.extend(body_factor(TemperamentFactorKind::LordOfNativity, lord, chart));

    let mut scores = QualityScores::default();
    for factor in &factors {
        scores.add(factor.qualities, factor.weight);
    }
    let temperament = Temperament::from_qualities(scores.hot > scores.cold, scores.wet > scores.dry);

    TemperamentResult {
        temperament,
        scores,
        factors,
        ascendant_ruler,
        lord_of_nativity: lord,
    }
}
