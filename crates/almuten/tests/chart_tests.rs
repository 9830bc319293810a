mod common;

use chrono::NaiveDate;

use almuten::chart::{house_for_longitude, ChartBuilder, LotKind, SyzygyKind};
use almuten::ephemeris::{Body, FixedHouses, HouseSystem, MeanOrbitEphemeris};
use almuten::western::{Sect, Sign};
use almuten::{BirthData, ChartError};

use common::{diurnal_chart, nocturnal_chart, EPOCH};

fn rome_birth() -> BirthData {
    let datetime = NaiveDate::from_ymd_opt(1987, 6, 14)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    BirthData::new(datetime, "+02:00", 41.9, 12.5).with_house_system(HouseSystem::Equal)
}

#[test]
fn test_building_twice_gives_identical_charts() {
    let eph = MeanOrbitEphemeris::new();
    let builder = ChartBuilder::new(&eph, &eph);
    let first = builder.build_chart(&rome_birth()).unwrap();
    let second = builder.build_chart(&rome_birth()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_positions_follow_body_order() {
    let chart = diurnal_chart();
    let order: Vec<Body> = chart.positions.iter().map(|p| p.body).collect();
    assert_eq!(order, Body::ALL.to_vec());
    for position in &chart.positions {
        assert_eq!(position.dignity.is_some(), position.body.is_classical());
        assert!((1..=12).contains(&position.house));
    }
    let jupiter = chart.position(Body::Jupiter).unwrap();
    assert!(jupiter.retrograde);
    assert_eq!(jupiter.sign, Sign::Cancer);
}

#[test]
fn test_every_longitude_lands_in_a_house() {
    // cusps crossing 0° Aries
    let cusps: Vec<f64> = (0..12).map(|i| (345.0 + 30.0 * i as f64) % 360.0).collect();
    let mut lon = 0.0;
    while lon < 360.0 {
        let house = house_for_longitude(lon, &cusps);
        assert!((1..=12).contains(&house), "{} -> {}", lon, house);
        lon += 0.25;
    }
    assert_eq!(house_for_longitude(350.0, &cusps), 1);
    assert_eq!(house_for_longitude(10.0, &cusps), 1);
    assert_eq!(house_for_longitude(344.9, &cusps), 12);
}

#[test]
fn test_aspects_are_unique_unordered_pairs() {
    let chart = diurnal_chart();
    let mut seen = std::collections::HashSet::new();
    for aspect in &chart.aspects {
        assert!(aspect.first < aspect.second);
        assert!(aspect.orb <= aspect.kind.default_orb());
        assert!(seen.insert((aspect.first, aspect.second)));
    }
    assert!(chart.aspect_between(Body::Saturn, Body::Sun).is_some());
    assert!(chart.aspect_between(Body::Sun, Body::Saturn).is_some());
}

#[test]
fn test_sect_follows_the_horizon() {
    assert_eq!(diurnal_chart().sect, Sect::Diurnal);
    assert_eq!(nocturnal_chart().sect, Sect::Nocturnal);
}

#[test]
fn test_lots_reverse_by_night() {
    let day = diurnal_chart();
    let night = nocturnal_chart();
    // asc + moon - sun by day
    let fortune = day.lot(LotKind::Fortune).unwrap();
    assert!((fortune.longitude - 25.0).abs() < 1e-9);
    // asc + sun - moon by night
    let fortune = night.lot(LotKind::Fortune).unwrap();
    assert!((fortune.longitude - 155.0).abs() < 1e-9);
}

#[test]
fn test_prenatal_syzygy_precedes_birth() {
    let chart = diurnal_chart();
    let syzygy = chart.prenatal_syzygy.unwrap();
    assert_eq!(syzygy.kind, SyzygyKind::NewMoon);
    // 25° of elongation closing at 12°/day
    assert!((EPOCH - syzygy.julian_day - 25.0 / 12.0).abs() < 0.01);
}

#[test]
fn test_whole_sign_houses_start_at_sign() {
    let eph = common::fixture_ephemeris();
    let houses = FixedHouses::equal(17.0);
    let chart = ChartBuilder::new(&eph, &houses)
        .build_chart_at(EPOCH, common::location(), HouseSystem::WholeSign)
        .unwrap();
    assert_eq!(chart.houses[0].longitude, 0.0);
    assert_eq!(chart.angles.ascendant, 17.0);
    assert_eq!(chart.houses.len(), 12);
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let eph = MeanOrbitEphemeris::new();
    let mut birth = rome_birth();
    birth.timezone = "Europe/Rome".to_string();
    let err = ChartBuilder::new(&eph, &eph).build_chart(&birth).unwrap_err();
    assert!(matches!(err, ChartError::UnknownTimezone(_)));
}
