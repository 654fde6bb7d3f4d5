//! Location-free sun model: seasonal declination plus a UTC hour angle.

use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Timelike, Utc};
use glam::{DVec3, Vec3};

use crate::position::solar_declination;

/// Fraction of the UTC day elapsed, in [0, 1).
fn utc_day_fraction(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.num_seconds_from_midnight() as f64;
    let nanos = instant.nanosecond() as f64 * 1e-9;
    (seconds + nanos) / 86_400.0
}

/// Sun direction from the date alone, ignoring observer location.
///
/// Uses the seasonal declination and a linear hour angle derived from UTC
/// time of day: `H = day_fraction * 2π − π`, so UTC noon puts the sun over
/// the reference meridian (+Z). This skips the right-ascension and
/// sidereal-time terms of the full model and deliberately has no azimuthal
/// tie to longitude; it is offered as a distinct, cheaper mode, not as an
/// approximation to be corrected.
pub fn simplified_sun_direction(instant: DateTime<Utc>) -> Vec3 {
    let declination = solar_declination(instant);
    let hour_angle = utc_day_fraction(instant) * TAU - PI;

    DVec3::new(
        declination.cos() * hour_angle.sin(),
        declination.sin(),
        declination.cos() * hour_angle.cos(),
    )
    .normalize()
    .as_vec3()
}
