//! Root finding for "when does this angle reach a target".
//!
//! Every search works on the deviation `f(t) = wrap(angle(t) - target)` in
//! (-180, 180]. A sign change of `f` between two samples is a crossing only
//! when the jump is small; a jump of nearly 360° is the wrap discontinuity
//! on the far side of the circle and is skipped. Bisection keeps the half
//! that still holds the sign change.

use serde::{Deserialize, Serialize};

use crate::error::EphemerisError;
use crate::western::zodiac::signed_difference;

/// Termination limits for one bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BisectionConfig {
    /// Converged once |f| falls below this, degrees
    pub tolerance_deg: f64,
    /// Converged once the bracket is narrower than this, days
    pub min_interval_days: f64,
    pub max_iterations: u32,
}

impl BisectionConfig {
    pub fn new(tolerance_deg: f64, min_interval_seconds: f64, max_iterations: u32) -> Self {
        Self {
            tolerance_deg,
            min_interval_days: min_interval_seconds / 86_400.0,
            max_iterations,
        }
    }
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self::new(1e-4, 1.0, 100)
    }
}

/// A located crossing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crossing {
    pub julian_day: f64,
    /// Remaining deviation from the target at `julian_day`, degrees
    pub deviation: f64,
    pub iterations: u32,
}

/// Coarse-scan settings for [`scan_crossings`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub step_days: f64,
    /// A sample this close to the target counts as a touch even without a sign change
    pub near_zero_deg: f64,
    /// Crossings closer together than this are the same pass
    pub dedup_days: f64,
    pub refine: BisectionConfig,
}

/// Wrap an angle into (-180, 180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    signed_difference(deg, 0.0)
}

/// A sign change that is not the ±180° wrap.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

fn deviation_at<F>(angle_at: &mut F, target: f64, t: f64) -> Result<f64, EphemerisError>
where
    F: FnMut(f64) -> Result<f64, EphemerisError>,
{
    Ok(signed_difference(angle_at(t)?, target))
}

/// Bisect `[t_a, t_b]` for the instant `angle_at` equals `target`.
///
/// `Ok(None)` when the window does not bracket the target, or when the
/// iteration cap is reached before either tolerance.
pub fn find_crossing<F>(
    mut angle_at: F,
    target: f64,
    t_a: f64,
    t_b: f64,
    config: &BisectionConfig,
) -> Result<Option<Crossing>, EphemerisError>
where
    F: FnMut(f64) -> Result<f64, EphemerisError>,
{
    let (mut t_a, mut t_b) = if t_a <= t_b { (t_a, t_b) } else { (t_b, t_a) };
    let mut f_a = deviation_at(&mut angle_at, target, t_a)?;
    let f_b = deviation_at(&mut angle_at, target, t_b)?;

    if f_a.abs() <= config.tolerance_deg {
        return Ok(Some(Crossing { julian_day: t_a, deviation: f_a, iterations: 0 }));
    }
    if f_b.abs() <= config.tolerance_deg {
        return Ok(Some(Crossing { julian_day: t_b, deviation: f_b, iterations: 0 }));
    }
    if !is_genuine_crossing(f_a, f_b) {
        log::debug!(
            "window JD {:.5}..{:.5} does not bracket {:.5} (f_a={:.5}, f_b={:.5})",
            t_a, t_b, target, f_a, f_b
        );
        return Ok(None);
    }

    for iteration in 1..=config.max_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = deviation_at(&mut angle_at, target, t_mid)?;

        if f_mid.abs() <= config.tolerance_deg {
            return Ok(Some(Crossing { julian_day: t_mid, deviation: f_mid, iterations: iteration }));
        }

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }

        if t_b - t_a < config.min_interval_days {
            let t_final = 0.5 * (t_a + t_b);
            let f_final = deviation_at(&mut angle_at, target, t_final)?;
            return Ok(Some(Crossing { julian_day: t_final, deviation: f_final, iterations: iteration }));
        }
    }

    log::warn!(
        "bisection for {:.5} did not converge in {} iterations (JD {:.5}..{:.5})",
        target, config.max_iterations, t_a, t_b
    );
    Ok(None)
}

/// Every crossing of `target` between `start` and `end`, chronological.
///
/// Samples at `step_days`; each genuine sign change is bisected, and a sample
/// within `near_zero_deg` of the target is kept as a touch. Results closer
/// than `dedup_days` collapse to the one nearest the target.
pub fn scan_crossings<F>(
    mut angle_at: F,
    target: f64,
    start: f64,
    end: f64,
    config: &ScanConfig,
) -> Result<Vec<Crossing>, EphemerisError>
where
    F: FnMut(f64) -> Result<f64, EphemerisError>,
{
    if !(config.step_days > 0.0) || end <= start {
        log::warn!("empty scan: JD {:.5}..{:.5} step {}", start, end, config.step_days);
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    let mut t_prev = start;
    let mut f_prev = deviation_at(&mut angle_at, target, t_prev)?;
    if f_prev.abs() <= config.near_zero_deg {
        found.push(Crossing { julian_day: t_prev, deviation: f_prev, iterations: 0 });
    }

    while t_prev < end {
        let t_curr = (t_prev + config.step_days).min(end);
        let f_curr = deviation_at(&mut angle_at, target, t_curr)?;

        if is_genuine_crossing(f_prev, f_curr) {
            if let Some(crossing) = find_crossing(&mut angle_at, target, t_prev, t_curr, &config.refine)? {
                log::debug!(
                    "crossing of {:.4} at JD {:.5} after {} iterations",
                    target, crossing.julian_day, crossing.iterations
                );
                found.push(crossing);
            }
        } else if f_curr.abs() <= config.near_zero_deg {
            found.push(Crossing { julian_day: t_curr, deviation: f_curr, iterations: 0 });
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }

    Ok(dedup_crossings(found, config.dedup_days))
}

pub(crate) fn dedup_crossings(mut found: Vec<Crossing>, min_separation_days: f64) -> Vec<Crossing> {
    found.sort_by(|a, b| a.julian_day.total_cmp(&b.julian_day));
    let mut kept: Vec<Crossing> = Vec::with_capacity(found.len());
    for crossing in found {
        match kept.last_mut() {
            Some(last) if crossing.julian_day - last.julian_day < min_separation_days => {
                if crossing.deviation.abs() < last.deviation.abs() {
                    *last = crossing;
                }
            }
            _ => kept.push(crossing),
        }
    }
    kept
}

/// Most recent crossing at or before `start`, stepping backward at most `max_span_days`.
pub fn find_previous_crossing<F>(
    mut angle_at: F,
    target: f64,
    start: f64,
    step_days: f64,
    max_span_days: f64,
    config: &BisectionConfig,
) -> Result<Option<Crossing>, EphemerisError>
where
    F: FnMut(f64) -> Result<f64, EphemerisError>,
{
    if !(step_days > 0.0) {
        return Ok(None);
    }
    let max_steps = (max_span_days / step_days).ceil() as usize;
    let mut t_prev = start;
    let mut f_prev = deviation_at(&mut angle_at, target, t_prev)?;
    if f_prev.abs() <= config.tolerance_deg {
        return Ok(Some(Crossing { julian_day: t_prev, deviation: f_prev, iterations: 0 }));
    }

    for _ in 0..max_steps {
        let t_curr = t_prev - step_days;
        let f_curr = deviation_at(&mut angle_at, target, t_curr)?;
        if is_genuine_crossing(f_curr, f_prev) || f_curr.abs() <= config.tolerance_deg {
            return find_crossing(&mut angle_at, target, t_curr, t_prev, config);
        }
        t_prev = t_curr;
        f_prev = f_curr;
    }

    log::warn!(
        "no crossing of {:.4} within {} days before JD {:.5}",
        target, max_span_days, start
    );
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_to_pm180() {
        assert!((normalize_to_pm180(180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_to_pm180(-180.0) - 180.0).abs() < 1e-10);
        assert!((normalize_to_pm180(270.0) + 90.0).abs() < 1e-10);
        assert!((normalize_to_pm180(450.0) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_wraparound_is_not_a_crossing() {
        assert!(is_genuine_crossing(5.0, -3.0));
        assert!(!is_genuine_crossing(170.0, -170.0));
        assert!(!is_genuine_crossing(1.0, 2.0));
    }

    #[test]
    fn test_find_crossing_through_zero_aries() {
        // a body moving 1°/day from 358°
        let lon = |t: f64| Ok(crate::western::zodiac::normalize_degrees(358.0 + t));
        let cfg = BisectionConfig::new(1e-6, 0.001, 100);
        let crossing = find_crossing(lon, 0.0, 0.0, 5.0, &cfg).unwrap().unwrap();
        assert!((crossing.julian_day - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_unbracketed_window_returns_none() {
        let lon = |t: f64| Ok(10.0 + t);
        let cfg = BisectionConfig::default();
        assert!(find_crossing(lon, 50.0, 0.0, 5.0, &cfg).unwrap().is_none());
    }

    #[test]
    fn test_iteration_cap_returns_none() {
        let lon = |t: f64| Ok(t);
        let cfg = BisectionConfig {
            tolerance_deg: 1e-12,
            min_interval_days: 0.0,
            max_iterations: 3,
        };
        assert!(find_crossing(lon, 0.3, 0.0, 1.0, &cfg).unwrap().is_none());
    }

    #[test]
    fn test_scan_finds_three_passes_of_a_loop() {
        // a retrograde loop centred on t = 100 crosses 100° three times
        let lon = |t: f64| {
            let u = t - 100.0;
            Ok(100.0 + 0.1 * u - 3.0 * (u / 15.0).sin())
        };
        let cfg = ScanConfig {
            step_days: 1.0,
            near_zero_deg: 1e-6,
            dedup_days: 5.0,
            refine: BisectionConfig::new(1e-6, 1.0, 100),
        };
        let crossings = scan_crossings(lon, 100.0, 1.0, 200.0, &cfg).unwrap();
        assert_eq!(crossings.len(), 3);
        assert!((crossings[1].julian_day - 100.0).abs() < 1e-6);
        for pair in crossings.windows(2) {
            assert!(pair[0].julian_day < pair[1].julian_day);
        }
        for c in &crossings {
            assert!(c.deviation.abs() < 1e-3);
        }
    }

    #[test]
    fn test_dedup_keeps_closest_to_target() {
        let found = vec![
            Crossing { julian_day: 10.0, deviation: 0.01, iterations: 0 },
            Crossing { julian_day: 10.5, deviation: 0.0001, iterations: 4 },
            Crossing { julian_day: 50.0, deviation: 0.001, iterations: 4 },
        ];
        let kept = dedup_crossings(found, 30.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].julian_day, 10.5);
    }

    #[test]
    fn test_find_previous_crossing() {
        let lon = |t: f64| Ok(crate::western::zodiac::normalize_degrees(12.0 * t));
        let cfg = BisectionConfig::new(1e-6, 1e-6, 200);
        // crossings of 180° at t = 15 + 30k
        let crossing = find_previous_crossing(lon, 180.0, 40.0, 0.5, 32.0, &cfg)
            .unwrap()
            .unwrap();
        assert!((crossing.julian_day - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_previous_crossing_at_the_start_itself() {
        // elongation of a Moon sitting on the Sun at t = 0
        let elongation = |t: f64| Ok(crate::western::zodiac::normalize_degrees(12.0 * t));
        let cfg = BisectionConfig::new(1e-4, 1.0, 100);
        let crossing = find_previous_crossing(elongation, 0.0, 0.0, 0.5, 32.0, &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(crossing.julian_day, 0.0);
        assert_eq!(crossing.iterations, 0);
    }
}
