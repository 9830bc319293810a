mod common;

use almuten::ephemeris::Body;
use almuten::aspects::AspectKind;
use almuten::traditional::{AlcochodenStatus, HylegCandidate, YearsModifier, YearsTier};
use almuten::{resolve_alcochoden, resolve_hyleg, HylegResult};
use almuten::western::Sect;

use common::{classical_chart, diurnal_chart};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mars_gives_the_years() {
        let chart = diurnal_chart();
        let hyleg = resolve_hyleg(&chart);
        let result = resolve_alcochoden(&hyleg, &chart);

        // Saturn, Mars and Venus hold five points each at 15° Capricorn;
        // Venus casts no major aspect, Mars and Saturn trine exactly, Mars comes first.
        let alcochoden = result.alcochoden.unwrap();
        assert_eq!(alcochoden.body, Body::Mars);
        assert_eq!(alcochoden.points, 5);

        // in detriment in Taurus
        assert_eq!(alcochoden.tier, YearsTier::Minor);
        assert_eq!(alcochoden.base_years, 15.0);
        assert!(alcochoden
            .modifiers
            .contains(&YearsModifier::Succedent { house: 2, years: 1.0 }));
        assert!(alcochoden
            .modifiers
            .iter()
            .any(|m| matches!(m, YearsModifier::BeneficAspect { body: Body::Jupiter, .. })));
        assert_eq!(alcochoden.years, 21.0);
    }

    #[test]
    fn test_candidate_statuses() {
        let chart = diurnal_chart();
        let result = resolve_alcochoden(&resolve_hyleg(&chart), &chart);
        let status_of = |body: Body| {
            result
                .candidates
                .iter()
                .find(|c| c.body == body)
                .map(|c| c.status)
                .unwrap()
        };
        assert_eq!(status_of(Body::Sun), AlcochodenStatus::IsHyleg);
        assert_eq!(status_of(Body::Venus), AlcochodenStatus::NoAspect);
        assert_eq!(status_of(Body::Jupiter), AlcochodenStatus::NoDignity);
        assert_eq!(status_of(Body::Saturn), AlcochodenStatus::Qualified);
        assert_eq!(result.candidates.len(), 7);
        assert_eq!(result.candidates[0].points, 5);
    }

    #[test]
    fn test_no_hyleg_means_no_alcochoden() {
        let chart = diurnal_chart();
        let empty = HylegResult {
            sect: Sect::Diurnal,
            hyleg: None,
            evaluations: Vec::new(),
        };
        let result = resolve_alcochoden(&empty, &chart);
        assert!(result.hyleg.is_none());
        assert!(result.alcochoden.is_none());
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn test_combust_exalted_mars_takes_minor_years() {
        // Mars exalted at 10° Capricorn but 5° from the Sun; Jupiter now qualifies the Sun
        let chart = classical_chart([285.0, 310.0, 270.0, 240.0, 280.0, 100.0, 140.0], 0.0);
        let hyleg = resolve_hyleg(&chart);
        assert_eq!(hyleg.hyleg.as_ref().unwrap().qualification.body, Body::Jupiter);

        let alcochoden = resolve_alcochoden(&hyleg, &chart).alcochoden.unwrap();
        assert_eq!(alcochoden.body, Body::Mars);
        assert_eq!(alcochoden.tier, YearsTier::Minor);
        assert_eq!(alcochoden.base_years, 15.0);
        assert_eq!(alcochoden.modifiers, vec![YearsModifier::Angular { house: 10, years: 3.0 }]);
        assert_eq!(alcochoden.years, 18.0);
    }

    #[test]
    fn test_sun_is_never_combust_with_itself() {
        // Aries rising by day: the Sun leads at 0° Aries with exaltation and triplicity
        let chart = classical_chart([240.0, 40.0, 215.0, 200.0, 120.0, 100.0, 20.0], 0.0);
        let hyleg = resolve_hyleg(&chart);
        assert_eq!(hyleg.hyleg.as_ref().unwrap().candidate, HylegCandidate::Ascendant);

        let alcochoden = resolve_alcochoden(&hyleg, &chart).alcochoden.unwrap();
        assert_eq!(alcochoden.body, Body::Sun);
        assert_eq!(alcochoden.points, 7);
        assert_eq!(alcochoden.tier, YearsTier::Middle);
        assert_eq!(alcochoden.base_years, 69.5);
        assert_eq!(alcochoden.modifiers, vec![YearsModifier::Cadent { house: 9, years: -2.0 }]);
        assert_eq!(alcochoden.years, 67.5);
    }

    #[test]
    fn test_exalted_angular_mars_squared_by_saturn() {
        let chart = classical_chart([210.0, 40.0, 200.0, 220.0, 270.0, 100.0, 180.0], 0.0);
        let hyleg = resolve_hyleg(&chart);
        assert_eq!(hyleg.hyleg.as_ref().unwrap().candidate, HylegCandidate::Ascendant);

        let result = resolve_alcochoden(&hyleg, &chart);
        let sun = result.candidates.iter().find(|c| c.body == Body::Sun).unwrap();
        assert_eq!(sun.points, 7);
        assert_eq!(sun.status, AlcochodenStatus::NoAspect);

        let alcochoden = result.alcochoden.unwrap();
        assert_eq!(alcochoden.body, Body::Mars);
        assert_eq!(alcochoden.points, 6);
        assert_eq!(alcochoden.tier, YearsTier::Major);
        assert_eq!(alcochoden.base_years, 66.0);
        assert_eq!(
            alcochoden.modifiers,
            vec![
                YearsModifier::Angular { house: 10, years: 3.0 },
                YearsModifier::MaleficAspect {
                    body: Body::Saturn,
                    kind: AspectKind::Square,
                    years: -5.0,
                },
            ]
        );
        assert_eq!(alcochoden.years, 64.0);
    }

    #[test]
    fn test_years_never_go_below_zero() {
        // Libra rising: combust cadent Venus squared by Mars and Saturn, 8 - 2 - 5 - 5
        let chart = classical_chart([58.0, 300.0, 270.0, 60.0, 150.0, 100.0, 330.0], 180.0);
        let hyleg = resolve_hyleg(&chart);
        let hyleg_point = hyleg.hyleg.as_ref().unwrap();
        assert_eq!(hyleg_point.candidate, HylegCandidate::Ascendant);
        assert_eq!(hyleg_point.qualification.body, Body::Venus);

        let result = resolve_alcochoden(&hyleg, &chart);
        // Saturn holds nine points at 0° Libra but casts no aspect
        assert_eq!(result.candidates[0].body, Body::Saturn);
        assert_eq!(result.candidates[0].status, AlcochodenStatus::NoAspect);

        let alcochoden = result.alcochoden.unwrap();
        assert_eq!(alcochoden.body, Body::Venus);
        assert_eq!(alcochoden.tier, YearsTier::Minor);
        assert_eq!(alcochoden.base_years, 8.0);
        let total: f64 = alcochoden.base_years + alcochoden.modifiers.iter().map(YearsModifier::years).sum::<f64>();
        assert_eq!(total, -4.0);
        assert_eq!(alcochoden.years, 0.0);
    }
}
