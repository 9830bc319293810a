//! Solar Return: the Sun's annual return to its natal longitude.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::chart::builder::ChartBuilder;
use crate::chart::types::Chart;
use crate::ephemeris::{Body, BodyState, EphemerisProvider, GeoLocation};
use crate::error::{ChartError, ReturnError};
use crate::returns::types::{
    HouseOverlay, ReturnComparison, ReturnPass, ReturnSearchConfig, SolarReturnChart,
};
use crate::search::find_crossing;
use crate::time::{julian_day_from_utc, utc_from_julian_day};

/// Cross-chart aspects kept in a comparison.
pub const MAX_CROSS_ASPECTS: usize = 10;

/// The birthday in `year` at the birth's UT clock time; 29 February falls back to the 28th.
pub fn anniversary(birth: DateTime<Utc>, year: i32) -> Result<DateTime<Utc>, ReturnError> {
    let date = NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| {
            if birth.month() == 2 && birth.day() == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
        .ok_or(ReturnError::InvalidYear(year))?;
    Ok(date.and_time(birth.time()).and_utc())
}

/// Locate the Solar Return instant for `year`.
pub fn find_solar_return(
    ephemeris: &dyn EphemerisProvider,
    natal_sun_longitude: f64,
    birth: DateTime<Utc>,
    year: i32,
    config: &ReturnSearchConfig,
) -> Result<ReturnPass, ReturnError> {
    let center = julian_day_from_utc(anniversary(birth, year)?);
    let window = config.solar.window_days;
    let (start, end) = (center - window, center + window);

    let crossing = find_crossing(
        |jd| ephemeris.longitude_of(Body::Sun, jd),
        natal_sun_longitude,
        start,
        end,
        &config.solar.refine,
    )?
    .ok_or(ReturnError::NoCrossing {
        body: Body::Sun,
        target: natal_sun_longitude,
        start_jd: start,
        end_jd: end,
    })?;

    let state = ephemeris.position_of(Body::Sun, crossing.julian_day)?;
    log::debug!(
        "solar return {} at JD {:.6} (deviation {:.2e})",
        year, crossing.julian_day, crossing.deviation
    );
    Ok(ReturnPass {
        julian_day: crossing.julian_day,
        instant: utc_from_julian_day(crossing.julian_day),
        longitude: state.longitude,
        retrograde: state.speed < 0.0,
        sequence: 1,
    })
}

fn comparable(chart: &Chart) -> Vec<(Body, BodyState)> {
    chart
        .positions
        .iter()
        .filter(|p| p.body != Body::NorthNode)
        .map(|p| (p.body, p.state()))
        .collect()
}

/// House overlays and the tightest return-to-natal aspects.
pub fn compare_charts(builder: &ChartBuilder<'_>, return_chart: &Chart, natal: &Chart) -> ReturnComparison {
    let house_overlays = return_chart
        .positions
        .iter()
        .map(|p| HouseOverlay {
            body: p.body,
            return_house: p.house,
            natal_house: natal.house_of(p.longitude),
        })
        .collect();

    let mut cross_aspects = builder
        .aspect_calculator()
        .compute_cross_aspects(&comparable(return_chart), &comparable(natal));
    cross_aspects.sort_by(|a, b| {
        a.orb
            .total_cmp(&b.orb)
            .then_with(|| a.first.cmp(&b.first))
            .then_with(|| a.second.cmp(&b.second))
    });
    cross_aspects.truncate(MAX_CROSS_ASPECTS);

    ReturnComparison {
        house_overlays,
        cross_aspects,
    }
}

/// Solar Return chart for `year`, cast for `location`, compared with the natal chart.
pub fn solar_return(
    builder: &ChartBuilder<'_>,
    natal: &Chart,
    year: i32,
    location: GeoLocation,
    config: &ReturnSearchConfig,
) -> Result<SolarReturnChart, ReturnError> {
    let natal_sun = natal
        .position(Body::Sun)
        .ok_or_else(|| ChartError::InvalidDateTime("natal chart has no Sun".to_string()))?;
    let birth = natal
        .instant
        .ok_or_else(|| ChartError::InvalidDateTime(format!("Julian Day {}", natal.julian_day)))?;

    let pass = find_solar_return(builder.ephemeris(), natal_sun.longitude, birth, year, config)?;
    let chart = builder.build_chart_at(pass.julian_day, location, natal.house_system)?;
    let comparison = compare_charts(builder, &chart, natal);

    Ok(SolarReturnChart {
        year,
        pass,
        chart,
        comparison,
    })
}
