//! Static term, face and triplicity tables.

use serde::Serialize;

use crate::ephemeris::Body;
use crate::western::types::Sect;
use crate::western::zodiac::{Element, Sign};

/// A sub-range of a sign, `[start, end)` in degrees, with its lord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bound {
    pub start: f64,
    pub end: f64,
    pub ruler: Body,
}

impl Bound {
    const fn new(start: f64, end: f64, ruler: Body) -> Self {
        Self { start, end, ruler }
    }

    pub fn contains(&self, degree: f64) -> bool {
        degree >= self.start && degree < self.end
    }
}

use Body::{Jupiter as JU, Mars as MA, Mercury as ME, Saturn as SA, Venus as VE};

/// Egyptian terms, Aries through Pisces.
pub const TERMS: [[Bound; 5]; 12] = [
    [Bound::new(0.0, 6.0, JU), Bound::new(6.0, 12.0, VE), Bound::new(12.0, 20.0, ME), Bound::new(20.0, 25.0, MA), Bound::new(25.0, 30.0, SA)],
    [Bound::new(0.0, 8.0, VE), Bound::new(8.0, 14.0, ME), Bound::new(14.0, 22.0, JU), Bound::new(22.0, 27.0, SA), Bound::new(27.0, 30.0, MA)],
    [Bound::new(0.0, 6.0, ME), Bound::new(6.0, 12.0, JU), Bound::new(12.0, 17.0, VE), Bound::new(17.0, 24.0, MA), Bound::new(24.0, 30.0, SA)],
    [Bound::new(0.0, 7.0, MA), Bound::new(7.0, 13.0, VE), Bound::new(13.0, 19.0, ME), Bound::new(19.0, 26.0, JU), Bound::new(26.0, 30.0, SA)],
    [Bound::new(0.0, 6.0, JU), Bound::new(6.0, 11.0, VE), Bound::new(11.0, 18.0, SA), Bound::new(18.0, 24.0, ME), Bound::new(24.0, 30.0, MA)],
    [Bound::new(0.0, 7.0, ME), Bound::new(7.0, 17.0, VE), Bound::new(17.0, 21.0, JU), Bound::new(21.0, 28.0, MA), Bound::new(28.0, 30.0, SA)],
    [Bound::new(0.0, 6.0, SA), Bound::new(6.0, 14.0, ME), Bound::new(14.0, 21.0, JU), Bound::new(21.0, 28.0, VE), Bound::new(28.0, 30.0, MA)],
    [Bound::new(0.0, 7.0, MA), Bound::new(7.0, 11.0, VE), Bound::new(11.0, 19.0, ME), Bound::new(19.0, 24.0, JU), Bound::new(24.0, 30.0, SA)],
    [Bound::new(0.0, 12.0, JU), Bound::new(12.0, 17.0, VE), Bound::new(17.0, 21.0, ME), Bound::new(21.0, 26.0, SA), Bound::new(26.0, 30.0, MA)],
    [Bound::new(0.0, 7.0, ME), Bound::new(7.0, 14.0, JU), Bound::new(14.0, 22.0, VE), Bound::new(22.0, 26.0, SA), Bound::new(26.0, 30.0, MA)],
    [Bound::new(0.0, 7.0, ME), Bound::new(7.0, 13.0, VE), Bound::new(13.0, 20.0, JU), Bound::new(20.0, 25.0, MA), Bound::new(25.0, 30.0, SA)],
    [Bound::new(0.0, 12.0, VE), Bound::new(12.0, 16.0, JU), Bound::new(16.0, 19.0, ME), Bound::new(19.0, 28.0, MA), Bound::new(28.0, 30.0, SA)],
];

/// Descending planetary order; faces cycle through it from 0° Aries.
const CHALDEAN_ORDER: [Body; 7] = [
    Body::Mars,
    Body::Sun,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Saturn,
    Body::Jupiter,
];

lazy_static::lazy_static! {
    /// Chaldean faces (decans), Aries through Pisces.
    pub static ref FACES: [[Bound; 3]; 12] = {
        let mut faces = [[Bound::new(0.0, 10.0, Body::Mars); 3]; 12];
        for (sign, row) in faces.iter_mut().enumerate() {
            for (decan, face) in row.iter_mut().enumerate() {
                let start = decan as f64 * 10.0;
                *face = Bound::new(start, start + 10.0, CHALDEAN_ORDER[(sign * 3 + decan) % 7]);
            }
        }
        faces
    };
}

fn lookup(bounds: &[Bound], degree: f64) -> Option<Body> {
    bounds.iter().find(|b| b.contains(degree)).map(|b| b.ruler)
}

/// Term lord for a degree within a sign.
pub fn term_ruler(sign: Sign, degree_in_sign: f64) -> Option<Body> {
    lookup(&TERMS[sign.index()], degree_in_sign)
}

/// Face lord for a degree within a sign.
pub fn face_ruler(sign: Sign, degree_in_sign: f64) -> Option<Body> {
    lookup(&FACES[sign.index()], degree_in_sign)
}

/// Dorothean triplicity lord of an element for the given sect.
pub fn triplicity_ruler(element: Element, sect: Sect) -> Body {
    let (day, night) = match element {
        Element::Fire => (Body::Sun, Body::Jupiter),
        Element::Earth => (Body::Venus, Body::Moon),
        Element::Air => (Body::Saturn, Body::Mercury),
        Element::Water => (Body::Venus, Body::Mars),
    };
    match sect {
        Sect::Diurnal => day,
        Sect::Nocturnal => night,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_span_each_sign() {
        for table in TERMS.iter().map(|r| r.as_slice()).chain(FACES.iter().map(|r| r.as_slice())) {
            assert_eq!(table[0].start, 0.0);
            assert_eq!(table[table.len() - 1].end, 30.0);
            for pair in table.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }

    #[test]
    fn test_face_sequence() {
        assert_eq!(face_ruler(Sign::Aries, 0.0), Some(Body::Mars));
        assert_eq!(face_ruler(Sign::Aries, 15.0), Some(Body::Sun));
        assert_eq!(face_ruler(Sign::Taurus, 5.0), Some(Body::Mercury));
        assert_eq!(face_ruler(Sign::Pisces, 29.9), Some(Body::Mars));
    }

    #[test]
    fn test_term_and_triplicity_lookup() {
        assert_eq!(term_ruler(Sign::Aries, 5.99), Some(Body::Jupiter));
        assert_eq!(term_ruler(Sign::Aries, 6.0), Some(Body::Venus));
        assert_eq!(term_ruler(Sign::Leo, 30.0), None);
        assert_eq!(triplicity_ruler(Element::Water, Sect::Nocturnal), Body::Mars);
        assert_eq!(triplicity_ruler(Element::Air, Sect::Diurnal), Body::Saturn);
    }
}
