pub mod builder;
pub mod houses;
pub mod lots;
pub mod syzygy;
pub mod types;

pub use builder::{build_chart, BirthData, ChartBuilder, ChartSettings};
pub use houses::{house_for_longitude, is_angular, is_cadent, is_succedent};
pub use types::{Angles, Chart, HouseCusp, Lot, LotKind, Position, Syzygy, SyzygyKind};
