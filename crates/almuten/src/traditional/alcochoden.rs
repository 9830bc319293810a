//! Alcochoden, the giver of years.

use std::cmp::Ordering;

use crate::aspects::AspectCalculator;
use crate::chart::houses::{is_angular, is_succedent};
use crate::chart::types::Chart;
use crate::ephemeris::Body;
use crate::traditional::types::{
    Alcochoden, AlcochodenCandidate, AlcochodenResult, AlcochodenStatus, HylegResult, YearsModifier,
    YearsTier,
};
use crate::western::dignities::{dignities_of, DignityLabel};
use crate::western::zodiac::angular_separation;

/// Within this distance of the Sun a body is combust.
pub const COMBUSTION_ORB: f64 = 8.0;

const ANGULAR_YEARS: f64 = 3.0;
const SUCCEDENT_YEARS: f64 = 1.0;
const CADENT_YEARS: f64 = -2.0;
const BENEFIC_YEARS: f64 = 5.0;
const MALEFIC_YEARS: f64 = -5.0;

/// Minor, middle and major planetary years.
pub fn planetary_years(body: Body) -> Option<(f64, f64, f64)> {
    match body {
        Body::Saturn => Some((30.0, 43.5, 57.0)),
        Body::Jupiter => Some((12.0, 45.5, 79.0)),
        Body::Mars => Some((15.0, 40.5, 66.0)),
        Body::Sun => Some((19.0, 69.5, 120.0)),
        Body::Venus => Some((8.0, 45.0, 82.0)),
        Body::Mercury => Some((20.0, 48.0, 76.0)),
        Body::Moon => Some((25.0, 66.5, 108.0)),
        _ => None,
    }
}

fn years_for(body: Body, tier: YearsTier) -> f64 {
    planetary_years(body).map_or(0.0, |(minor, middle, major)| match tier {
        YearsTier::Minor => minor,
        YearsTier::Middle => middle,
        YearsTier::Major => major,
    })
}

/// Candidates rank by points, then the tighter aspect, then body order.
fn rank(a: &AlcochodenCandidate, b: &AlcochodenCandidate) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| {
            let (oa, ob) = (a.orb.unwrap_or(f64::MAX), b.orb.unwrap_or(f64::MAX));
            oa.total_cmp(&ob)
        })
        .then_with(|| a.body.cmp(&b.body))
}

fn select_tier(body: Body, chart: &Chart) -> YearsTier {
    let Some(position) = chart.position(body) else {
        return YearsTier::Middle;
    };
    let combust = body != Body::Sun
        && chart
            .position(Body::Sun)
            .map_or(false, |sun| angular_separation(sun.longitude, position.longitude) <= COMBUSTION_ORB);
    let labels = position
        .dignity
        .as_ref()
        .map(|d| d.labels.clone())
        .unwrap_or_default();
    let has = |label: DignityLabel| labels.contains(&label);

    if combust || has(DignityLabel::Detriment) || has(DignityLabel::Fall) {
        YearsTier::Minor
    } else if has(DignityLabel::Domicile) || has(DignityLabel::Exaltation) {
        YearsTier::Major
    } else {
        YearsTier::Middle
    }
}

fn modifiers_for(body: Body, chart: &Chart) -> Vec<YearsModifier> {
    let mut modifiers = Vec::new();
    if let Some(position) = chart.position(body) {
        let house = position.house;
        modifiers.push(if is_angular(house) {
            YearsModifier::Angular { house, years: ANGULAR_YEARS }
        } else if is_succedent(house) {
            YearsModifier::Succedent { house, years: SUCCEDENT_YEARS }
        } else {
            YearsModifier::Cadent { house, years: CADENT_YEARS }
        });
    }

    for aspect in chart.aspects_of(body) {
        let Some(other) = aspect.other(body) else {
            continue;
        };
        if other.is_benefic() && aspect.kind.is_harmonious() {
            modifiers.push(YearsModifier::BeneficAspect {
                body: other,
                kind: aspect.kind,
                years: BENEFIC_YEARS,
            });
        } else if other.is_malefic() && aspect.kind.is_hard() {
            modifiers.push(YearsModifier::MaleficAspect {
                body: other,
                kind: aspect.kind,
                years: MALEFIC_YEARS,
            });
        }
    }
    modifiers
}

/// Resolve the Alcochoden with the default orbs.
pub fn resolve_alcochoden(hyleg: &HylegResult, chart: &Chart) -> AlcochodenResult {
    resolve_alcochoden_with(hyleg, chart, &AspectCalculator::default())
}

pub fn resolve_alcochoden_with(
    hyleg: &HylegResult,
    chart: &Chart,
    calculator: &AspectCalculator,
) -> AlcochodenResult {
    let Some(hyleg) = hyleg.hyleg.as_ref() else {
        log::debug!("no hyleg, so no alcochoden");
        return AlcochodenResult {
            hyleg: None,
            alcochoden: None,
            candidates: Vec::new(),
        };
    };
    let place = hyleg.placement;
    let hyleg_body = hyleg.candidate.body();

    let mut candidates: Vec<AlcochodenCandidate> = Body::CLASSICAL
        .iter()
        .map(|body| {
            let body = *body;
            let dignities: Vec<DignityLabel> =
                dignities_of(body, place.sign, place.degree_in_sign, chart.sect)
                    .into_iter()
                    .filter(|l| !l.is_debility())
                    .collect();
            let points = dignities.iter().map(DignityLabel::points).sum();
            let aspect = chart.position(body).and_then(|p| {
                calculator.calculate_major_aspect(p.longitude, place.longitude, p.speed, place.speed)
            });

            let status = if Some(body) == hyleg_body {
                AlcochodenStatus::IsHyleg
            } else if dignities.is_empty() {
                AlcochodenStatus::NoDignity
            } else if aspect.is_none() {
                AlcochodenStatus::NoAspect
            } else {
                AlcochodenStatus::Qualified
            };

            AlcochodenCandidate {
                body,
                dignities,
                points,
                aspect: aspect.map(|a| a.kind),
                orb: aspect.map(|a| a.orb),
                status,
            }
        })
        .collect();
    candidates.sort_by(rank);

    let winner = candidates
        .iter()
        .find(|c| c.status == AlcochodenStatus::Qualified)
        .map(|c| {
            let tier = select_tier(c.body, chart);
            let base_years = years_for(c.body, tier);
            let modifiers = modifiers_for(c.body, chart);
            let total: f64 = base_years + modifiers.iter().map(YearsModifier::years).sum::<f64>();
            Alcochoden {
                body: c.body,
                points: c.points,
                tier,
                base_years,
                modifiers,
                years: total.max(0.0),
            }
        });

    if let Some(a) = &winner {
        log::debug!("alcochoden {} ({:?}, {} years)", a.body, a.tier, a.years);
    }

    AlcochodenResult {
        hyleg: Some(hyleg.candidate),
        alcochoden: winner,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::AspectKind;

    #[test]
    fn test_years_table() {
        assert_eq!(planetary_years(Body::Saturn), Some((30.0, 43.5, 57.0)));
        assert_eq!(planetary_years(Body::Moon), Some((25.0, 66.5, 108.0)));
        assert_eq!(planetary_years(Body::Pluto), None);
        assert_eq!(years_for(Body::Venus, YearsTier::Major), 82.0);
    }

    #[test]
    fn test_rank_prefers_points_then_orb_then_body() {
        let make = |body, points, orb| AlcochodenCandidate {
            body,
            dignities: vec![],
            points,
            aspect: Some(AspectKind::Trine),
            orb: Some(orb),
            status: AlcochodenStatus::Qualified,
        };
        let mut list = vec![
            make(Body::Saturn, 3, 1.0),
            make(Body::Mars, 5, 4.0),
            make(Body::Venus, 3, 1.0),
            make(Body::Jupiter, 3, 0.5),
        ];
        list.sort_by(rank);
        let order: Vec<Body> = list.iter().map(|c| c.body).collect();
        assert_eq!(order, vec![Body::Mars, Body::Jupiter, Body::Venus, Body::Saturn]);
    }
}
