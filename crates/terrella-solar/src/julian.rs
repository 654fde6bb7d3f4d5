//! Julian day conversion.

use chrono::{DateTime, Utc};

/// Julian day number of the J2000 epoch (2000-01-01T12:00:00Z).
pub const J2000: f64 = 2_451_545.0;

/// Julian day number of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert a UTC instant to a fractional Julian day.
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Fractional days since the J2000 epoch. Negative for instants before 2000.
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    julian_day(instant) - J2000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_j2000_epoch_is_zero_days() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let days = days_since_j2000(epoch);
        assert!(days.abs() < 1e-9, "J2000 noon should be day 0, got {days}");
    }

    #[test]
    fn test_unix_epoch_julian_day() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        let jd = julian_day(epoch);
        assert!(
            (jd - 2_440_587.5).abs() < 1e-9,
            "Unix epoch should be JD 2440587.5, got {jd}"
        );
    }

    #[test]
    fn test_one_day_apart() {
        let a = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 6, 22, 12, 0, 0).unwrap();
        let delta = julian_day(b) - julian_day(a);
        assert!(
            (delta - 1.0).abs() < 1e-9,
            "24 hours should be exactly one Julian day, got {delta}"
        );
    }

    #[test]
    fn test_half_day_fraction() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let delta = julian_day(noon) - julian_day(midnight);
        assert!((delta - 0.5).abs() < 1e-9, "noon is half a day in, got {delta}");
    }
}
