mod common;

use almuten::compute_temperament;
use almuten::ephemeris::Body;
use almuten::qualities::{lord_of_nativity, Temperament, TemperamentFactorKind};

use common::diurnal_chart;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_chart_is_choleric() {
        let chart = diurnal_chart();
        let result = compute_temperament(&chart);

        assert_eq!(result.ascendant_ruler, Body::Mars);
        // the Sun holds exaltation and day triplicity at 0° Aries
        assert_eq!(result.lord_of_nativity, Body::Sun);
        assert_eq!(lord_of_nativity(&chart), Body::Sun);

        let kinds: Vec<TemperamentFactorKind> = result.factors.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TemperamentFactorKind::AscendantSign,
                TemperamentFactorKind::AscendantRuler,
                TemperamentFactorKind::SolarSeason,
                TemperamentFactorKind::LunarPhase,
                TemperamentFactorKind::LordOfNativity,
            ]
        );
        // Mars in detriment counts three quarters
        assert_eq!(result.factors[1].weight, 0.75);

        assert!((result.scores.hot - 3.75).abs() < 1e-9);
        assert!((result.scores.cold - 1.0).abs() < 1e-9);
        assert!((result.scores.wet - 2.0).abs() < 1e-9);
        assert!((result.scores.dry - 2.75).abs() < 1e-9);
        assert_eq!(result.temperament, Temperament::Choleric);
    }

    #[test]
    fn test_scores_sum_the_factor_weights() {
        let result = compute_temperament(&common::nocturnal_chart());
        let total: f64 = result.factors.iter().map(|f| f.weight).sum();
        assert!((result.scores.hot + result.scores.cold - total).abs() < 1e-9);
        assert!((result.scores.wet + result.scores.dry - total).abs() < 1e-9);
    }
}
