//! Hyleg determination.
//!
//! Candidates are evaluated in a fixed order, each by a pure locator plus the
//! shared qualification test. The first qualified candidate wins; every
//! evaluated candidate stays in the trail with its reason.

use crate::aspects::AspectCalculator;
use crate::chart::types::{Chart, LotKind};
use crate::ephemeris::Body;
use crate::traditional::types::{
    CandidateEvaluation, CandidateStatus, Hyleg, HylegCandidate, HylegResult, PointPlacement,
    QualificationRule, QualifyingAspect,
};
use crate::western::rulers::domicile_ruler;
use crate::western::zodiac::{degree_in_sign, normalize_degrees, sign_of};

/// Bodies whose aspect can qualify a candidate besides the lord of its sign.
pub const PROROGATORY_BODIES: [Body; 5] = [
    Body::Sun,
    Body::Moon,
    Body::Venus,
    Body::Jupiter,
    Body::Mercury,
];

/// How far above the Ascendant a 12th-house point still counts.
const TWELFTH_HOUSE_MARGIN: f64 = 5.0;

fn body_placement(chart: &Chart, body: Body) -> Result<PointPlacement, String> {
    chart
        .position(body)
        .map(|p| PointPlacement {
            longitude: p.longitude,
            speed: p.speed,
            sign: p.sign,
            degree_in_sign: p.degree_in_sign,
            house: p.house,
        })
        .ok_or_else(|| format!("{} missing from chart", body))
}

fn point_placement(chart: &Chart, longitude: f64) -> PointPlacement {
    let longitude = normalize_degrees(longitude);
    PointPlacement {
        longitude,
        speed: 0.0,
        sign: sign_of(longitude),
        degree_in_sign: degree_in_sign(longitude),
        house: chart.house_of(longitude),
    }
}

/// Locate a candidate in the chart.
fn locate(candidate: HylegCandidate, chart: &Chart) -> Result<PointPlacement, String> {
    match candidate {
        HylegCandidate::Sun => body_placement(chart, Body::Sun),
        HylegCandidate::Moon => body_placement(chart, Body::Moon),
        HylegCandidate::Ascendant => {
            let mut placement = point_placement(chart, chart.angles.ascendant);
            placement.house = 1;
            Ok(placement)
        }
        HylegCandidate::PartOfFortune => chart
            .lot(LotKind::Fortune)
            .map(|lot| point_placement(chart, lot.longitude))
            .ok_or_else(|| "part of fortune not computed".to_string()),
        HylegCandidate::PrenatalSyzygy => chart
            .prenatal_syzygy
            .map(|s| point_placement(chart, s.longitude))
            .ok_or_else(|| "prenatal syzygy not found".to_string()),
    }
}

/// Houses 1, 7, 9, 10, 11, or the last five degrees of the 12th before the Ascendant.
pub fn is_hylegical_place(house: u8, longitude: f64, ascendant: f64) -> bool {
    match house {
        1 | 7 | 9 | 10 | 11 => true,
        12 => normalize_degrees(ascendant - longitude) <= TWELFTH_HOUSE_MARGIN,
        _ => false,
    }
}

fn qualify(
    candidate: HylegCandidate,
    placement: &PointPlacement,
    chart: &Chart,
    calculator: &AspectCalculator,
) -> CandidateStatus {
    let itself = candidate.body();
    let aspect_from = |body: Body| {
        if Some(body) == itself {
            return None;
        }
        let position = chart.position(body)?;
        calculator
            .calculate_major_aspect(position.longitude, placement.longitude, position.speed, placement.speed)
            .map(|core| (body, core))
    };

    let ruler = domicile_ruler(placement.sign);
    if let Some((body, core)) = aspect_from(ruler) {
        return CandidateStatus::Qualified {
            qualification: QualifyingAspect {
                rule: QualificationRule::DomicileRuler,
                body,
                kind: core.kind,
                orb: core.orb,
            },
        };
    }

    if let Some((body, core)) = PROROGATORY_BODIES.iter().find_map(|b| aspect_from(*b)) {
        return CandidateStatus::Qualified {
            qualification: QualifyingAspect {
                rule: QualificationRule::Prorogatory,
                body,
                kind: core.kind,
                orb: core.orb,
            },
        };
    }

    let aspected_by: Vec<Body> = Body::CLASSICAL
        .iter()
        .filter_map(|b| aspect_from(*b).map(|(body, _)| body))
        .collect();
    if aspected_by.is_empty() {
        CandidateStatus::NoAspect
    } else {
        CandidateStatus::NoQualifyingAspect { aspected_by }
    }
}

/// Evaluate one candidate against the chart.
pub fn evaluate_candidate(
    candidate: HylegCandidate,
    chart: &Chart,
    calculator: &AspectCalculator,
) -> CandidateEvaluation {
    let placement = match locate(candidate, chart) {
        Ok(placement) => placement,
        Err(reason) => {
            log::debug!("hyleg candidate {} skipped: {}", candidate, reason);
            return CandidateEvaluation {
                candidate,
                placement: None,
                status: CandidateStatus::Unavailable { reason },
            };
        }
    };

    let status = if !is_hylegical_place(placement.house, placement.longitude, chart.angles.ascendant) {
        CandidateStatus::NotInHylegicalPlace {
            house: placement.house,
        }
    } else {
        qualify(candidate, &placement, chart, calculator)
    };

    CandidateEvaluation {
        candidate,
        placement: Some(placement),
        status,
    }
}

/// Resolve the Hyleg with the default orbs.
pub fn resolve_hyleg(chart: &Chart) -> HylegResult {
    resolve_hyleg_with(chart, &AspectCalculator::default())
}

/// Resolve the Hyleg using a specific aspect calculator.
pub fn resolve_hyleg_with(chart: &Chart, calculator: &AspectCalculator) -> HylegResult {
    let mut evaluations = Vec::with_capacity(5);
    let mut hyleg = None;

    for candidate in HylegCandidate::order(chart.sect) {
        let evaluation = evaluate_candidate(candidate, chart, calculator);
        if let (CandidateStatus::Qualified { qualification }, Some(placement)) =
            (&evaluation.status, evaluation.placement)
        {
            hyleg = Some(Hyleg {
                candidate,
                placement,
                qualification: *qualification,
            });
        }
        evaluations.push(evaluation);
        if hyleg.is_some() {
            break;
        }
    }

    match &hyleg {
        Some(h) => log::debug!("hyleg is {} via {:?}", h.candidate, h.qualification.rule),
        None => log::debug!("no hyleg among {} candidates", evaluations.len()),
    }

    HylegResult {
        sect: chart.sect,
        hyleg,
        evaluations,
    }
}
