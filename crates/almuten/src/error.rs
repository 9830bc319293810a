use thiserror::Error;

use crate::ephemeris::Body;

/// Errors raised by an ephemeris or house-cusp provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("House system {system} is not supported by the {provider} provider (supported: {})", supported.join(", "))]
    UnsupportedHouseSystem {
        system: String,
        provider: String,
        supported: Vec<String>,
    },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Input-domain errors for chart construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

/// Errors raised by the return searches.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReturnError {
    #[error("No crossing of {target:.4}° by {body} between JD {start_jd:.5} and JD {end_jd:.5}")]
    NoCrossing {
        body: Body,
        target: f64,
        start_jd: f64,
        end_jd: f64,
    },
    #[error("Year {0} cannot hold an anniversary of the birth date")]
    InvalidYear(i32),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}
