pub mod saturn;
pub mod solar;
pub mod types;

pub use saturn::{find_saturn_return_cycle, saturn_return_analysis};
pub use solar::{anniversary, compare_charts, find_solar_return, solar_return};
pub use types::{
    HouseOverlay, ReturnComparison, ReturnCycle, ReturnPass, ReturnSearchConfig,
    SaturnReturnReport, SaturnSearchConfig, SolarReturnChart, SolarSearchConfig,
};
