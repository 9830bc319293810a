//! Saturn Return: every pass of Saturn over its natal longitude.
//!
//! A retrograde loop over the natal degree gives three passes in one return,
//! otherwise there is one. Each cycle is scanned daily around its estimated
//! date and every crossing is refined by bisection.

use chrono::{DateTime, Utc};

use crate::ephemeris::{Body, EphemerisProvider};
use crate::error::{EphemerisError, ReturnError};
use crate::returns::types::{ReturnCycle, ReturnPass, ReturnSearchConfig, SaturnReturnReport};
use crate::search::{dedup_crossings, scan_crossings, ScanConfig};
use crate::time::{julian_day_from_utc, utc_from_julian_day, DAYS_PER_JULIAN_YEAR};

/// Every pass of one return falls within this span of the others.
const SATURN_SYNODIC_DAYS: f64 = 378.09;
const MAX_WIDENINGS: u32 = 4;

/// Passes of cycle `cycle` (1-based), or `None` when the scan holds none.
///
/// The geocentric passes can sit most of a year from `birth + n * period`,
/// so the window grows until it reaches a synodic period past the first and
/// last pass found.
pub fn find_saturn_return_cycle(
    ephemeris: &dyn EphemerisProvider,
    birth_jd: f64,
    natal_longitude: f64,
    cycle: u32,
    config: &ReturnSearchConfig,
) -> Result<Option<ReturnCycle>, EphemerisError> {
    let saturn = &config.saturn;
    let period_days = saturn.period_years * DAYS_PER_JULIAN_YEAR;
    let center = birth_jd + f64::from(cycle) * period_days;
    let scan = ScanConfig {
        step_days: saturn.step_days,
        near_zero_deg: saturn.refine.tolerance_deg,
        dedup_days: saturn.dedup_days,
        refine: saturn.refine,
    };
    let saturn_between = |start: f64, end: f64| {
        scan_crossings(
            |jd| ephemeris.longitude_of(Body::Saturn, jd),
            natal_longitude,
            start,
            end,
            &scan,
        )
    };

    let mut start = center - saturn.window_days;
    let mut end = center + saturn.window_days;
    let mut crossings = saturn_between(start, end)?;

    for _ in 0..MAX_WIDENINGS {
        let (want_start, want_end) = match (crossings.first(), crossings.last()) {
            (Some(first), Some(last)) => (
                first.julian_day - SATURN_SYNODIC_DAYS,
                last.julian_day + SATURN_SYNODIC_DAYS,
            ),
            _ => (start - saturn.window_days, end + saturn.window_days),
        };
        if want_start >= start && want_end <= end {
            break;
        }
        if want_start < start {
            crossings.extend(saturn_between(want_start, start)?);
            start = want_start;
        }
        if want_end > end {
            crossings.extend(saturn_between(end, want_end)?);
            end = want_end;
        }
        crossings = dedup_crossings(crossings, saturn.dedup_days);
        log::debug!(
            "saturn cycle {}: widened scan to JD {:.2}..{:.2}, {} crossing(s)",
            cycle, start, end, crossings.len()
        );
    }

    if crossings.is_empty() {
        log::warn!(
            "no saturn pass over {:.4} between JD {:.2} and JD {:.2}",
            natal_longitude, start, end
        );
        return Ok(None);
    }

    let mut passes = Vec::with_capacity(crossings.len());
    for (i, crossing) in crossings.iter().enumerate() {
        let state = ephemeris.position_of(Body::Saturn, crossing.julian_day)?;
        passes.push(ReturnPass {
            julian_day: crossing.julian_day,
            instant: utc_from_julian_day(crossing.julian_day),
            longitude: state.longitude,
            retrograde: state.speed < 0.0,
            sequence: (i + 1) as u32,
        });
    }
    log::debug!("saturn return cycle {}: {} pass(es)", cycle, passes.len());

    let first = passes[0].julian_day;
    let last = passes[passes.len() - 1].julian_day;
    Ok(Some(ReturnCycle {
        cycle,
        start: utc_from_julian_day(first),
        end: utc_from_julian_day(last),
        age_at_first_pass: (first - birth_jd) / DAYS_PER_JULIAN_YEAR,
        passes,
    }))
}

/// Past, current and next Saturn returns as seen from `as_of`.
pub fn saturn_return_analysis(
    ephemeris: &dyn EphemerisProvider,
    birth: DateTime<Utc>,
    natal_longitude: f64,
    natal_house: u8,
    as_of: DateTime<Utc>,
    config: &ReturnSearchConfig,
) -> Result<SaturnReturnReport, ReturnError> {
    let birth_jd = julian_day_from_utc(birth);
    let now = julian_day_from_utc(as_of);
    let period_days = config.saturn.period_years * DAYS_PER_JULIAN_YEAR;

    let mut past_cycles = Vec::new();
    let mut current_cycle = None;
    let mut next_cycle = None;

    for n in 1..=config.saturn.max_cycles {
        let found = find_saturn_return_cycle(ephemeris, birth_jd, natal_longitude, n, config)?;
        let Some((cycle, first, last)) = found.and_then(|c| {
            let span = (c.first_julian_day()?, c.last_julian_day()?);
            Some((c, span.0, span.1))
        }) else {
            let center = birth_jd + f64::from(n) * period_days;
            return Err(ReturnError::NoCrossing {
                body: Body::Saturn,
                target: natal_longitude,
                start_jd: center - config.saturn.window_days,
                end_jd: center + config.saturn.window_days,
            });
        };
        if last < now {
            past_cycles.push(cycle);
        } else if first <= now {
            current_cycle = Some(cycle);
        } else {
            next_cycle = Some(cycle);
            break;
        }
    }

    let last_return = past_cycles
        .last()
        .and_then(ReturnCycle::last_julian_day)
        .unwrap_or(birth_jd);
    let progress_percent = if period_days > 0.0 {
        ((now - last_return) / period_days * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    let days_until_next = next_cycle
        .as_ref()
        .and_then(ReturnCycle::first_julian_day)
        .map(|first| first - now);

    Ok(SaturnReturnReport {
        natal_longitude,
        natal_house,
        as_of,
        past_cycles,
        current_cycle,
        next_cycle,
        progress_percent,
        days_until_next,
    })
}
