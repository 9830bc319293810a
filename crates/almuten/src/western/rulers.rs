//! Sign rulers for traditional astrology.
//!
//! Domicile and exaltation lords by sign. Only the seven classical bodies rule.

use crate::ephemeris::Body;
use crate::western::zodiac::{sign_of, Sign};

/// Traditional domicile ruler of a sign.
pub fn domicile_ruler(sign: Sign) -> Body {
    const DOMICILE_RULERS: [Body; 12] = [
        Body::Mars,    // Aries
        Body::Venus,   // Taurus
        Body::Mercury, // Gemini
        Body::Moon,    // Cancer
        Body::Sun,     // Leo
        Body::Mercury, // Virgo
        Body::Venus,   // Libra
        Body::Mars,    // Scorpio
        Body::Jupiter, // Sagittarius
        Body::Saturn,  // Capricorn
        Body::Saturn,  // Aquarius
        Body::Jupiter, // Pisces
    ];
    DOMICILE_RULERS[sign.index()]
}

/// Exaltation ruler of a sign, if any body is exalted there.
pub fn exaltation_ruler(sign: Sign) -> Option<Body> {
    match sign {
        Sign::Aries => Some(Body::Sun),
        Sign::Taurus => Some(Body::Moon),
        Sign::Cancer => Some(Body::Jupiter),
        Sign::Virgo => Some(Body::Mercury),
        Sign::Libra => Some(Body::Saturn),
        Sign::Capricorn => Some(Body::Mars),
        Sign::Pisces => Some(Body::Venus),
        _ => None,
    }
}

/// Domicile ruler of the sign containing a longitude.
pub fn domicile_ruler_of_longitude(longitude: f64) -> Body {
    domicile_ruler(sign_of(longitude))
}

/// True when `body` rules the sign opposite `sign`.
pub fn is_in_detriment(body: Body, sign: Sign) -> bool {
    domicile_ruler(sign.opposite()) == body
}

/// True when `body` is exalted in the sign opposite `sign`.
pub fn is_in_fall(body: Body, sign: Sign) -> bool {
    exaltation_ruler(sign.opposite()) == Some(body)
}
