//! Solar position astronomy for the simulated-sun lighting pipeline.
//!
//! Two models are provided. [`solar_position`] implements the low-precision
//! NOAA solar position algorithm and accounts for an observer's latitude and
//! longitude. [`simplified_sun_direction`] derives only the seasonal
//! declination and a UTC hour angle, which is cheaper and is the default when
//! no observer location is known. Both are pure functions of a UTC instant.

mod julian;
mod position;
mod simplified;

pub use julian::{J2000, days_since_j2000, julian_day};
pub use position::{SolarPosition, solar_declination, solar_position, sun_direction};
pub use simplified::simplified_sun_direction;
