//! Chart-level classifications shared by the western scorers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::western::zodiac::normalize_degrees;

/// Whether the Sun is above (diurnal) or below (nocturnal) the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sect {
    Diurnal,
    Nocturnal,
}

impl Sect {
    /// Houses 7 through 12 span the ecliptic from the Descendant forward to
    /// the Ascendant, i.e. `(sun - asc) mod 360` in [180, 360).
    pub fn determine(sun_longitude: f64, ascendant: f64) -> Sect {
        if normalize_degrees(sun_longitude - ascendant) >= 180.0 {
            Sect::Diurnal
        } else {
            Sect::Nocturnal
        }
    }

    pub fn is_diurnal(&self) -> bool {
        matches!(self, Sect::Diurnal)
    }
}

impl fmt::Display for Sect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sect::Diurnal => f.write_str("diurnal"),
            Sect::Nocturnal => f.write_str("nocturnal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sect_wraps_around_ascendant() {
        // Sun at the MC is above the horizon
        assert_eq!(Sect::determine(270.0, 0.0), Sect::Diurnal);
        assert_eq!(Sect::determine(90.0, 0.0), Sect::Nocturnal);
        // Ascendant near the end of the zodiac
        assert_eq!(Sect::determine(300.0, 350.0), Sect::Diurnal);
        assert_eq!(Sect::determine(10.0, 350.0), Sect::Nocturnal);
        // On the Descendant counts as above
        assert_eq!(Sect::determine(180.0, 0.0), Sect::Diurnal);
    }
}
