mod common;

use almuten::aspects::AspectKind;
use almuten::ephemeris::Body;
use almuten::resolve_hyleg;
use almuten::chart::SyzygyKind;
use almuten::traditional::{CandidateStatus, HylegCandidate, QualificationRule};
use almuten::western::Sect;
use almuten::resolve_alcochoden;

use common::{classical_chart, diurnal_chart, nocturnal_chart};

/// Night chart, Aries rising, every candidate below the horizon or unaspected.
///
/// Sun 15° Cancer, Moon 10° Leo; Fortune at 5° Pisces, the new moon at 12°55' Cancer.
fn chart_without_hyleg() -> almuten::Chart {
    classical_chart([105.0, 130.0, 100.0, 140.0, 160.0, 145.0, 165.0], 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_chart_starts_with_the_sun() {
        let result = resolve_hyleg(&diurnal_chart());
        assert_eq!(result.evaluations[0].candidate, HylegCandidate::Sun);

        let hyleg = result.hyleg.unwrap();
        assert_eq!(hyleg.candidate, HylegCandidate::Sun);
        assert_eq!(hyleg.placement.house, 10);
        assert_eq!(hyleg.qualification.rule, QualificationRule::DomicileRuler);
        assert_eq!(hyleg.qualification.body, Body::Saturn);
        assert_eq!(hyleg.qualification.kind, AspectKind::Trine);
        // the trail stops at the first qualified candidate
        assert_eq!(result.evaluations.len(), 1);
    }

    #[test]
    fn test_night_chart_starts_with_the_moon() {
        let result = resolve_hyleg(&nocturnal_chart());
        let order: Vec<HylegCandidate> = result.evaluations.iter().map(|e| e.candidate).collect();
        assert_eq!(
            order,
            vec![HylegCandidate::Moon, HylegCandidate::Sun, HylegCandidate::Ascendant]
        );
        assert_eq!(
            result.evaluations[0].status,
            CandidateStatus::NotInHylegicalPlace { house: 5 }
        );
        assert_eq!(
            result.evaluations[1].status,
            CandidateStatus::NotInHylegicalPlace { house: 4 }
        );

        let hyleg = result.hyleg.unwrap();
        assert_eq!(hyleg.candidate, HylegCandidate::Ascendant);
        assert_eq!(hyleg.qualification.body, Body::Venus);
        assert_eq!(hyleg.qualification.kind, AspectKind::Sextile);
    }

    #[test]
    fn test_result_serializes_with_reasons() {
        let result = resolve_hyleg(&nocturnal_chart());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sect"], "nocturnal");
        assert_eq!(json["evaluations"][0]["status"]["status"], "not_in_hylegical_place");
    }

    #[test]
    fn test_no_hyleg_keeps_all_five_candidates() {
        let chart = chart_without_hyleg();
        assert_eq!(chart.sect, Sect::Nocturnal);
        let result = resolve_hyleg(&chart);

        assert!(result.hyleg.is_none());
        let trail: Vec<(HylegCandidate, CandidateStatus)> = result
            .evaluations
            .iter()
            .map(|e| (e.candidate, e.status.clone()))
            .collect();
        assert_eq!(
            trail,
            vec![
                (HylegCandidate::Moon, CandidateStatus::NotInHylegicalPlace { house: 5 }),
                (HylegCandidate::Sun, CandidateStatus::NotInHylegicalPlace { house: 4 }),
                (HylegCandidate::Ascendant, CandidateStatus::NoAspect),
                (HylegCandidate::PartOfFortune, CandidateStatus::NotInHylegicalPlace { house: 12 }),
                (HylegCandidate::PrenatalSyzygy, CandidateStatus::NotInHylegicalPlace { house: 4 }),
            ]
        );
        assert!(result.evaluations.iter().all(|e| e.placement.is_some()));

        let alcochoden = resolve_alcochoden(&result, &chart);
        assert!(alcochoden.alcochoden.is_none());
    }

    #[test]
    fn test_missing_points_are_unavailable() {
        let mut chart = chart_without_hyleg();
        chart.lots.clear();
        chart.prenatal_syzygy = None;
        let result = resolve_hyleg(&chart);

        assert!(result.hyleg.is_none());
        assert_eq!(result.evaluations.len(), 5);
        for evaluation in &result.evaluations[3..] {
            assert!(evaluation.placement.is_none());
            assert!(matches!(evaluation.status, CandidateStatus::Unavailable { .. }));
        }
    }

    #[test]
    fn test_part_of_fortune_as_hyleg() {
        // Saturn on the Ascendant aspects it without qualifying it, and sextiles
        // Fortune at 0° Aquarius from the sign's own lord.
        let chart = classical_chart([105.0, 165.0, 100.0, 140.0, 160.0, 145.0, 0.0], 0.0);
        let result = resolve_hyleg(&chart);

        assert_eq!(
            result.evaluations[2].status,
            CandidateStatus::NoQualifyingAspect { aspected_by: vec![Body::Saturn] }
        );
        let hyleg = result.hyleg.unwrap();
        assert_eq!(hyleg.candidate, HylegCandidate::PartOfFortune);
        assert_eq!(hyleg.placement.house, 11);
        assert!((hyleg.placement.longitude - 300.0).abs() < 1e-9);
        assert_eq!(hyleg.qualification.rule, QualificationRule::DomicileRuler);
        assert_eq!(hyleg.qualification.body, Body::Saturn);
        assert_eq!(hyleg.qualification.kind, AspectKind::Sextile);
        assert_eq!(result.evaluations.len(), 4);
    }

    #[test]
    fn test_prenatal_syzygy_as_hyleg() {
        // waning Moon: the full moon fell at 18°20' Aquarius, trined by Venus
        let chart = classical_chart([150.0, 110.0, 100.0, 200.0, 160.0, 105.0, 165.0], 0.0);
        let syzygy = chart.prenatal_syzygy.unwrap();
        assert_eq!(syzygy.kind, SyzygyKind::FullMoon);
        assert_eq!(syzygy.house, 11);

        let result = resolve_hyleg(&chart);
        assert_eq!(result.evaluations.len(), 5);
        assert_eq!(result.evaluations[2].status, CandidateStatus::NoAspect);
        assert_eq!(
            result.evaluations[3].status,
            CandidateStatus::NotInHylegicalPlace { house: 2 }
        );

        let hyleg = result.hyleg.unwrap();
        assert_eq!(hyleg.candidate, HylegCandidate::PrenatalSyzygy);
        assert!((hyleg.placement.longitude - 318.333).abs() < 0.01);
        assert_eq!(hyleg.qualification.rule, QualificationRule::Prorogatory);
        assert_eq!(hyleg.qualification.body, Body::Venus);
        assert_eq!(hyleg.qualification.kind, AspectKind::Trine);
        assert!((hyleg.qualification.orb - 5.0 / 3.0).abs() < 0.01);
    }
}
