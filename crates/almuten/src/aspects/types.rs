use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::Body;

/// Aspect kinds, majors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quincunx,
}

impl AspectKind {
    pub const ALL: [AspectKind; 9] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sesquiquadrate,
        AspectKind::Quincunx,
    ];

    pub const MAJOR: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle in degrees
    pub fn angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::Sesquiquadrate => 135.0,
            AspectKind::Quincunx => 150.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
            AspectKind::SemiSextile => "semi_sextile",
            AspectKind::SemiSquare => "semi_square",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
            AspectKind::Quincunx => "quincunx",
        }
    }

    pub fn is_major(&self) -> bool {
        AspectKind::MAJOR.contains(self)
    }

    /// Conjunction, sextile, trine.
    pub fn is_harmonious(&self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction | AspectKind::Sextile | AspectKind::Trine
        )
    }

    /// Conjunction, square, opposition.
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction | AspectKind::Square | AspectKind::Opposition
        )
    }

    /// Fixed orb used when no table overrides it.
    pub fn default_orb(&self) -> f64 {
        match self {
            AspectKind::Conjunction | AspectKind::Opposition | AspectKind::Trine => 8.0,
            AspectKind::Square => 7.0,
            AspectKind::Sextile => 6.0,
            AspectKind::Quincunx => 3.0,
            AspectKind::SemiSextile | AspectKind::SemiSquare | AspectKind::Sesquiquadrate => 2.0,
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        let key = match key.as_str() {
            "semisextile" => "semi_sextile",
            "semisquare" => "semi_square",
            "inconjunct" => "quincunx",
            other => other,
        };
        AspectKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == key)
            .ok_or_else(|| format!("Unknown aspect: {}", s))
    }
}

/// Maximum orb per aspect kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrbTable {
    orbs: BTreeMap<AspectKind, f64>,
}

impl OrbTable {
    pub fn orb(&self, kind: AspectKind) -> f64 {
        self.orbs.get(&kind).copied().unwrap_or_else(|| kind.default_orb())
    }

    pub fn with(mut self, kind: AspectKind, orb: f64) -> Self {
        self.orbs.insert(kind, orb);
        self
    }

    pub fn set(&mut self, kind: AspectKind, orb: f64) {
        self.orbs.insert(kind, orb);
    }

    pub fn iter(&self) -> impl Iterator<Item = (AspectKind, f64)> + '_ {
        self.orbs.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for OrbTable {
    fn default() -> Self {
        Self {
            orbs: AspectKind::ALL.iter().map(|k| (*k, k.default_orb())).collect(),
        }
    }
}

/// Core aspect information between two longitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub kind: AspectKind,
    /// Exact angle for this aspect
    pub exact_angle: f64,
    /// Measured angular separation (0-180)
    pub separation: f64,
    /// |separation - exact_angle|
    pub orb: f64,
    /// Whether the deviation from exact is shrinking
    pub applying: bool,
}

/// An aspect between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub first: Body,
    pub second: Body,
    pub kind: AspectKind,
    pub exact_angle: f64,
    pub separation: f64,
    pub orb: f64,
    pub applying: bool,
}

impl Aspect {
    pub fn from_core(first: Body, second: Body, core: AspectCore) -> Self {
        Self {
            first,
            second,
            kind: core.kind,
            exact_angle: core.exact_angle,
            separation: core.separation,
            orb: core.orb,
            applying: core.applying,
        }
    }

    pub fn involves(&self, body: Body) -> bool {
        self.first == body || self.second == body
    }

    /// The partner of `body` in this aspect, if `body` takes part.
    pub fn other(&self, body: Body) -> Option<Body> {
        if self.first == body {
            Some(self.second)
        } else if self.second == body {
            Some(self.first)
        } else {
            None
        }
    }

    pub fn between(&self, a: Body, b: Body) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}
