//! Low-precision NOAA solar position: declination, altitude, azimuth.
//!
//! Formulas follow the low-precision end of the NOAA solar position family.
//! Accuracy is on the order of a few arcminutes, which is far below anything
//! visible in a rendered sky, and every step is a total function: no input
//! date or location can make the math fail.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use glam::{DVec3, Vec3};

use crate::julian::days_since_j2000;

/// Mean obliquity of the ecliptic, degrees.
const OBLIQUITY_DEG: f64 = 23.4397;

/// Ecliptic longitude of Earth's perihelion, degrees.
const PERIHELION_DEG: f64 = 102.9372;

/// Sun angles for an observer, all in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarPosition {
    /// Angle above the horizon. Negative when the sun is below it.
    pub altitude: f64,
    /// Angle around the local vertical, 0 toward the reference axis.
    pub azimuth: f64,
    /// Angular distance north (+) or south (−) of the celestial equator.
    pub declination: f64,
}

/// Solar mean anomaly in radians for a given day count from J2000.
fn mean_anomaly(days: f64) -> f64 {
    (357.5291 + 0.985_600_28 * days).to_radians()
}

/// Equation of center in radians: the ellipse correction to the mean anomaly.
fn equation_of_center(m: f64) -> f64 {
    (1.9148 * m.sin() + 0.0200 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin()).to_radians()
}

/// Ecliptic longitude of the sun in radians.
fn ecliptic_longitude(days: f64) -> f64 {
    let m = mean_anomaly(days);
    m + equation_of_center(m) + PERIHELION_DEG.to_radians() + PI
}

/// Seasonal solar declination in radians for a UTC instant.
///
/// Continuous and approximately sinusoidal with a ~365.25-day period;
/// crosses zero near the two equinoxes. Shared by the full and the
/// simplified sun model.
pub fn solar_declination(instant: DateTime<Utc>) -> f64 {
    let l = ecliptic_longitude(days_since_j2000(instant));
    (l.sin() * OBLIQUITY_DEG.to_radians().sin()).asin()
}

/// Compute the sun's altitude, azimuth, and declination for an observer.
///
/// `latitude_deg` is expected in [-90, 90] and `longitude_deg` in
/// [-180, 180]; at the exact poles the azimuth is undefined and the result
/// degrades gracefully rather than failing.
pub fn solar_position(instant: DateTime<Utc>, latitude_deg: f64, longitude_deg: f64) -> SolarPosition {
    let days = days_since_j2000(instant);
    let obliquity = OBLIQUITY_DEG.to_radians();

    let l = ecliptic_longitude(days);
    let declination = (l.sin() * obliquity.sin()).asin();
    let right_ascension = (l.sin() * obliquity.cos()).atan2(l.cos());

    // Local sidereal time, then the hour angle of the sun.
    let sidereal = (280.16 + 360.985_623_5 * days - longitude_deg).to_radians();
    let hour_angle = sidereal - right_ascension;

    let phi = latitude_deg.to_radians();
    let altitude = (phi.sin() * declination.sin()
        + phi.cos() * declination.cos() * hour_angle.cos())
    .asin();
    let azimuth = hour_angle
        .sin()
        .atan2(hour_angle.cos() * phi.sin() - declination.tan() * phi.cos());

    SolarPosition {
        altitude,
        azimuth,
        declination,
    }
}

/// Convert (altitude, azimuth) to a unit direction in the render frame.
///
/// The frame is +Y up, azimuth 0 toward +Z, altitude 0 on the horizon plane
/// and π/2 at the zenith. The returned vector is the negation of the
/// incident-light direction, i.e. it points from the planet toward the sun,
/// matching the directional-light convention of the shading stage.
pub fn sun_direction(altitude: f64, azimuth: f64) -> Vec3 {
    let cos_alt = altitude.cos();
    DVec3::new(
        cos_alt * azimuth.sin(),
        altitude.sin(),
        cos_alt * azimuth.cos(),
    )
    .normalize()
    .as_vec3()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_direction_is_unit_everywhere() {
        let instant = noon_utc(2024, 6, 21);
        for lat in [-89.0, -45.0, 0.0, 23.44, 60.0, 89.0] {
            for lon in [-180.0, -90.0, 0.0, 45.0, 179.0] {
                let pos = solar_position(instant, lat, lon);
                let dir = sun_direction(pos.altitude, pos.azimuth);
                let len = dir.length();
                assert!(
                    (len - 1.0).abs() < 1e-5,
                    "direction at lat {lat} lon {lon} should be unit, got {len}"
                );
            }
        }
    }

    #[test]
    fn test_june_solstice_overhead_at_tropic_of_cancer() {
        // Solar noon at the tropic on the June solstice: sun near the zenith.
        let pos = solar_position(noon_utc(2024, 6, 21), 23.44, 0.0);
        let dir = sun_direction(pos.altitude, pos.azimuth);
        assert!(
            dir.y > 0.99,
            "solstice noon at the tropic should be near-vertical, got y = {}",
            dir.y
        );
    }

    #[test]
    fn test_december_solstice_is_annual_minimum() {
        // Same place and hour, sampled monthly: the December solstice noon
        // altitude must be the lowest of the year.
        let december = solar_position(noon_utc(2024, 12, 21), 23.44, 0.0).altitude;
        for month in 1..=11 {
            let other = solar_position(noon_utc(2024, month, 21), 23.44, 0.0).altitude;
            assert!(
                december < other,
                "December altitude {december} should undercut month {month} ({other})"
            );
        }
    }

    #[test]
    fn test_declination_flips_sign_at_equinoxes() {
        let before_march = solar_declination(noon_utc(2024, 3, 10));
        let after_march = solar_declination(noon_utc(2024, 3, 30));
        assert!(before_march < 0.0, "early March declination should be south");
        assert!(after_march > 0.0, "late March declination should be north");

        let before_september = solar_declination(noon_utc(2024, 9, 12));
        let after_september = solar_declination(noon_utc(2024, 10, 2));
        assert!(before_september > 0.0, "early September should be north");
        assert!(after_september < 0.0, "October should be south");
    }

    #[test]
    fn test_declination_period_is_one_year() {
        let a = solar_declination(noon_utc(2024, 6, 21));
        let b = solar_declination(noon_utc(2025, 6, 21));
        assert!(
            (a - b).abs() < 0.01,
            "declination should repeat after a year: {a} vs {b}"
        );
        // Amplitude is the obliquity.
        assert!(
            (a.to_degrees() - 23.44).abs() < 0.1,
            "June solstice declination should be near +23.44 deg, got {} deg",
            a.to_degrees()
        );
    }

    #[test]
    fn test_declination_is_continuous() {
        // Sample every 6 hours across a year; neighboring samples must not jump.
        let start = noon_utc(2024, 1, 1);
        let mut prev = solar_declination(start);
        for step in 1..(365 * 4) {
            let t = start + chrono::Duration::hours(6 * step);
            let d = solar_declination(t);
            assert!(
                (d - prev).abs() < 0.01,
                "declination jumped by {} rad at step {step}",
                (d - prev).abs()
            );
            prev = d;
        }
    }

    #[test]
    fn test_equinox_noon_at_equator() {
        // Near the March equinox on the equator the sun passes close to the
        // zenith at local solar noon, and the declination is near zero.
        let pos = solar_position(noon_utc(2024, 3, 20), 0.0, 0.0);
        assert!(
            pos.declination.abs() <= 0.01,
            "equinox declination should be ~0, got {}",
            pos.declination
        );
        let dir = sun_direction(pos.altitude, pos.azimuth);
        assert!(
            dir.y > 0.95,
            "equinox noon at the equator should be near-vertical, got y = {}",
            dir.y
        );
    }

    #[test]
    fn test_midnight_sun_is_below_horizon_at_equator() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let pos = solar_position(midnight, 0.0, 0.0);
        assert!(
            pos.altitude < 0.0,
            "midnight sun should be below the horizon, altitude {}",
            pos.altitude
        );
        let dir = sun_direction(pos.altitude, pos.azimuth);
        assert!(dir.y < 0.0, "midnight direction should point down, y = {}", dir.y);
    }

    #[test]
    fn test_zenith_direction() {
        let dir = sun_direction(std::f64::consts::FRAC_PI_2, 0.0);
        assert!(
            (dir.y - 1.0).abs() < 1e-6,
            "altitude pi/2 is the zenith, got {dir:?}"
        );
    }

    #[test]
    fn test_horizon_direction_lies_in_horizon_plane() {
        let dir = sun_direction(0.0, 1.234);
        assert!(
            dir.y.abs() < 1e-6,
            "altitude 0 should have no vertical component, got {}",
            dir.y
        );
    }
}
