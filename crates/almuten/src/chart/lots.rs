//! Arabic Parts.
//!
//! Each lot is `Asc + B - C`; by night B and C trade places.

use crate::chart::types::LotKind;
use crate::western::types::Sect;
use crate::western::zodiac::normalize_degrees;

/// Longitudes a lot calculation draws on.
#[derive(Debug, Clone, Copy)]
pub struct LotInputs {
    pub ascendant: f64,
    pub sun: f64,
    pub moon: f64,
    pub venus: f64,
    pub mercury: f64,
}

fn lot(ascendant: f64, day_b: f64, day_c: f64, sect: Sect) -> f64 {
    match sect {
        Sect::Diurnal => normalize_degrees(ascendant + day_b - day_c),
        Sect::Nocturnal => normalize_degrees(ascendant + day_c - day_b),
    }
}

/// Longitudes of all four lots, in [`LotKind::ALL`] order.
pub fn compute_lots(inputs: &LotInputs, sect: Sect) -> [(LotKind, f64); 4] {
    let asc = inputs.ascendant;
    let fortune = lot(asc, inputs.moon, inputs.sun, sect);
    let spirit = lot(asc, inputs.sun, inputs.moon, sect);
    let eros = lot(asc, inputs.venus, spirit, sect);
    let necessity = lot(asc, fortune, inputs.mercury, sect);
    [
        (LotKind::Fortune, fortune),
        (LotKind::Spirit, spirit),
        (LotKind::Eros, eros),
        (LotKind::Necessity, necessity),
    ]
}
