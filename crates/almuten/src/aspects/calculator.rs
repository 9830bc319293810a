use crate::aspects::types::{Aspect, AspectCore, AspectKind, OrbTable};
use crate::ephemeris::{Body, BodyState};
use crate::western::zodiac::signed_difference;

/// Aspect calculator
#[derive(Debug, Clone)]
pub struct AspectCalculator {
    orbs: OrbTable,
    include_minor: bool,
}

impl AspectCalculator {
    pub fn new(orbs: OrbTable, include_minor: bool) -> Self {
        Self {
            orbs,
            include_minor,
        }
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    /// Aspects between every unordered pair, in body order.
    pub fn compute_chart_aspects(&self, bodies: &[(Body, BodyState)]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (b1, s1) = bodies[i];
                let (b2, s2) = bodies[j];
                if let Some(core) =
                    self.calculate_aspect(s1.longitude, s2.longitude, s1.speed, s2.speed)
                {
                    aspects.push(Aspect::from_core(b1, b2, core));
                }
            }
        }
        aspects
    }

    /// Aspects from each body of `from` to each body of `to`.
    ///
    /// A body is never aspected to its own counterpart in the other set.
    pub fn compute_cross_aspects(
        &self,
        from: &[(Body, BodyState)],
        to: &[(Body, BodyState)],
    ) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for (b1, s1) in from {
            for (b2, s2) in to {
                if b1 == b2 {
                    continue;
                }
                if let Some(core) =
                    self.calculate_aspect(s1.longitude, s2.longitude, s1.speed, s2.speed)
                {
                    aspects.push(Aspect::from_core(*b1, *b2, core));
                }
            }
        }
        aspects
    }

    /// Tightest aspect between two longitudes within the configured orbs.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64, speed1: f64, speed2: f64) -> Option<AspectCore> {
        let kinds: &[AspectKind] = if self.include_minor {
            &AspectKind::ALL
        } else {
            &AspectKind::MAJOR
        };
        self.tightest(kinds, lon1, lon2, speed1, speed2)
    }

    /// Like [`calculate_aspect`](Self::calculate_aspect) but restricted to the five major aspects.
    pub fn calculate_major_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
    ) -> Option<AspectCore> {
        self.tightest(&AspectKind::MAJOR, lon1, lon2, speed1, speed2)
    }

    fn tightest(
        &self,
        kinds: &[AspectKind],
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
    ) -> Option<AspectCore> {
        let signed = signed_difference(lon1, lon2);
        let separation = signed.abs();

        let mut best: Option<(AspectKind, f64)> = None;
        for kind in kinds {
            let orb = (separation - kind.angle()).abs();
            if orb > self.orbs.orb(*kind) {
                continue;
            }
            if best.map_or(true, |(_, best_orb)| orb < best_orb) {
                best = Some((*kind, orb));
            }
        }

        best.map(|(kind, orb)| AspectCore {
            kind,
            exact_angle: kind.angle(),
            separation,
            orb,
            applying: is_applying(signed, speed1, speed2, kind.angle()),
        })
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new(OrbTable::default(), true)
    }
}

/// Applying when the deviation from the exact angle is shrinking.
///
/// `signed` is `lon1 - lon2` in (-180, 180]; the separation `|signed|`
/// changes at `sign(signed) * (speed1 - speed2)` degrees per day.
fn is_applying(signed: f64, speed1: f64, speed2: f64, exact_angle: f64) -> bool {
    let relative_speed = speed1 - speed2;
    let separation_rate = if signed == 0.0 {
        relative_speed.abs()
    } else {
        signed.signum() * relative_speed
    };
    let deviation = signed.abs() - exact_angle;
    deviation * separation_rate < 0.0
}
