//! Traditional astrology chart engine.
//!
//! Builds natal charts on top of an external ephemeris, scores essential
//! dignities, resolves the Hyleg and Alcochoden, aggregates Temperament and
//! Mentality, and locates Solar and Saturn returns.

pub mod error;
pub mod time;
pub mod search;
pub mod ephemeris;
pub mod western;
pub mod aspects;
pub mod chart;
pub mod traditional;
pub mod qualities;
pub mod returns;

pub use error::{ChartError, EphemerisError, ReturnError};
pub use time::{OffsetNormalizer, TimeNormalizer};
pub use ephemeris::{
    Body, BodyState, EphemerisProvider, GeoLocation, HouseCuspProvider, HouseFrame, HouseSystem,
    MeanOrbitEphemeris, SwissEphemerisAdapter,
};
pub use chart::{build_chart, BirthData, Chart, ChartBuilder, ChartSettings};
pub use traditional::{resolve_alcochoden, resolve_hyleg, AlcochodenResult, HylegResult};
pub use qualities::{compute_mentality, compute_temperament, MentalityResult, TemperamentResult};
pub use returns::{
    saturn_return_analysis, solar_return, ReturnCycle, ReturnPass, ReturnSearchConfig,
    SaturnReturnReport, SolarReturnChart,
};
pub use western::{dignities_of, dignity_weight, DignityLabel, EssentialState, Sect, Sign};
