//! Julian Day conversions and the time-normalisation seam.
//!
//! All computation runs on Julian Days (UT). Turning a civil date/time plus a
//! timezone identifier into that scale is delegated to a [`TimeNormalizer`].

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::ChartError;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000: f64 = 2_451_545.0;
/// Julian Day of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Convert a UTC instant to a Julian Day.
pub fn julian_day_from_utc(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Convert a Julian Day back to a UTC instant, rounded to the millisecond.
pub fn utc_from_julian_day(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Converts a local civil time in a named timezone to the uniform time scale.
pub trait TimeNormalizer {
    fn to_uniform_time(&self, local: NaiveDateTime, timezone: &str) -> Result<f64, ChartError>;
}

/// Normalizer for UTC and fixed-offset zones (`UTC`, `Z`, `+05:30`, `UTC-0800`).
///
/// Region identifiers such as `Europe/Rome` need historical offset data and are
/// rejected with [`ChartError::UnknownTimezone`]; callers supply their own
/// normalizer for those.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetNormalizer;

impl TimeNormalizer for OffsetNormalizer {
    fn to_uniform_time(&self, local: NaiveDateTime, timezone: &str) -> Result<f64, ChartError> {
        let offset = parse_fixed_offset(timezone)
            .ok_or_else(|| ChartError::UnknownTimezone(timezone.to_string()))?;
        let zoned = offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| ChartError::InvalidDateTime(format!("{local} {timezone}")))?;
        Ok(julian_day_from_utc(zoned.with_timezone(&Utc)))
    }
}

/// Parse `UTC`/`GMT`/`Z` with an optional `±HH`, `±HHMM` or `±HH:MM` suffix.
pub fn parse_fixed_offset(timezone: &str) -> Option<FixedOffset> {
    let upper = timezone.trim().to_ascii_uppercase();
    let rest = ["UTC", "GMT", "UT", "Z"]
        .iter()
        .find_map(|prefix| upper.strip_prefix(prefix))
        .unwrap_or(upper.as_str());
    if rest.is_empty() {
        return FixedOffset::east_opt(0);
    }

    let (sign, digits) = match rest.as_bytes()[0] {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        3 => (digits[..1].parse::<i32>().ok()?, digits[1..].parse::<i32>().ok()?),
        _ => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
    };
    if hours > 14 || minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
