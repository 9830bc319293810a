#![allow(dead_code)]

use almuten::chart::{Chart, ChartBuilder};
use almuten::ephemeris::{Body, EphemerisProvider, FixedHouses, GeoLocation, HouseSystem, LinearEphemeris};

/// 2000-01-01 12:00 UT
pub const EPOCH: f64 = 2_451_545.0;

/// Hand-placed positions at [`EPOCH`].
///
/// Sun 15° Capricorn, Moon 10° Aquarius, Mercury 0° Capricorn, Venus 0° Sagittarius,
/// Mars 15° Taurus, Jupiter 10° Cancer (retrograde), Saturn 15° Virgo.
pub fn fixture_ephemeris() -> LinearEphemeris {
    LinearEphemeris::new(EPOCH)
        .with(Body::Sun, 285.0, 1.0)
        .with(Body::Moon, 310.0, 13.0)
        .with(Body::Mercury, 270.0, 1.2)
        .with(Body::Venus, 240.0, 1.1)
        .with(Body::Mars, 45.0, 0.6)
        .with(Body::Jupiter, 100.0, -0.05)
        .with(Body::Saturn, 165.0, 0.03)
        .with(Body::Uranus, 20.0, 0.04)
        .with(Body::Neptune, 50.0, 0.02)
        .with(Body::Pluto, 200.0, 0.01)
        .with(Body::NorthNode, 140.0, -0.05)
}

pub fn location() -> GeoLocation {
    GeoLocation::new(41.9, 12.5)
}

/// Fixture chart with equal houses from `ascendant`.
pub fn fixture_chart(ascendant: f64) -> Chart {
    let eph = fixture_ephemeris();
    let houses = FixedHouses::equal(ascendant);
    ChartBuilder::new(&eph, &houses)
        .build_chart_at(EPOCH, location(), HouseSystem::Equal)
        .expect("fixture chart")
}

/// Aries rising: the Sun at 285° is above the horizon.
pub fn diurnal_chart() -> Chart {
    fixture_chart(0.0)
}

/// Libra rising: the Sun at 285° is below the horizon.
pub fn nocturnal_chart() -> Chart {
    fixture_chart(180.0)
}

/// Fixture chart with the seven classical bodies moved, keeping their speeds.
///
/// `longitudes` runs Sun, Moon, Mercury, Venus, Mars, Jupiter, Saturn.
pub fn classical_chart(longitudes: [f64; 7], ascendant: f64) -> Chart {
    let mut eph = fixture_ephemeris();
    for (body, longitude) in Body::CLASSICAL.iter().zip(longitudes) {
        let speed = eph.position_of(*body, EPOCH).expect("fixture body").speed;
        eph = eph.with(*body, longitude, speed);
    }
    let houses = FixedHouses::equal(ascendant);
    ChartBuilder::new(&eph, &houses)
        .build_chart_at(EPOCH, location(), HouseSystem::Equal)
        .expect("classical chart")
}
