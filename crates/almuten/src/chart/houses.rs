//! House membership by cusp interval.

use crate::western::zodiac::normalize_degrees;

/// House (1-based) whose half-open interval `[cusp_i, cusp_i+1)` holds `longitude`.
///
/// Intervals are measured forward from each cusp modulo 360, so a house that
/// straddles 0° Aries needs no special case. If no interval matches (a
/// degenerate cusp set), the house of the nearest preceding cusp is used.
pub fn house_for_longitude(longitude: f64, cusps: &[f64]) -> u8 {
    let n = cusps.len();
    if n == 0 {
        return 1;
    }
    let lon = normalize_degrees(longitude);

    for i in 0..n {
        let start = cusps[i];
        let span = normalize_degrees(cusps[(i + 1) % n] - start);
        if normalize_degrees(lon - start) < span {
            return (i + 1) as u8;
        }
    }

    let mut best = 0;
    let mut best_offset = f64::INFINITY;
    for (i, cusp) in cusps.iter().enumerate() {
        let offset = normalize_degrees(lon - cusp);
        if offset < best_offset {
            best_offset = offset;
            best = i;
        }
    }
    (best + 1) as u8
}

/// Angular houses 1, 4, 7, 10.
pub fn is_angular(house: u8) -> bool {
    matches!(house, 1 | 4 | 7 | 10)
}

/// Succedent houses 2, 5, 8, 11.
pub fn is_succedent(house: u8) -> bool {
    matches!(house, 2 | 5 | 8 | 11)
}

/// Cadent houses 3, 6, 9, 12.
pub fn is_cadent(house: u8) -> bool {
    matches!(house, 3 | 6 | 9 | 12)
}
