pub mod adapter;
pub mod linear;
pub mod mean_orbit;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use linear::{FixedHouses, LinearEphemeris};
pub use mean_orbit::MeanOrbitEphemeris;
pub use provider::{EphemerisProvider, HouseCuspProvider};
pub use types::{Body, BodyState, GeoLocation, HouseFrame, HouseSystem};
