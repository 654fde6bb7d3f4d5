//! Simulated date-time with a time-acceleration factor.

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// A simulated UTC clock advanced once per frame.
///
/// `time_speed` scales simulated time against wall time: 0 pauses the clock,
/// 1 runs it in real time, 60 makes one wall second a simulated minute, and
/// negative values run the simulation backward. The current instant moves
/// strictly monotonically in the direction of `time_speed`'s sign.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    current: DateTime<Utc>,
    time_speed: f64,
}

impl SimulationClock {
    /// Create a clock at the given instant, running in real time.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: start,
            time_speed: 1.0,
        }
    }

    /// The current simulated instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.current
    }

    /// The current acceleration multiplier.
    pub fn time_speed(&self) -> f64 {
        self.time_speed
    }

    /// Set the acceleration multiplier. 0 pauses the clock.
    pub fn set_time_speed(&mut self, speed: f64) {
        self.time_speed = speed;
    }

    /// Whether the clock is paused.
    pub fn is_paused(&self) -> bool {
        self.time_speed == 0.0
    }

    /// Replace the simulated instant outright.
    pub fn set_instant(&mut self, instant: DateTime<Utc>) {
        self.current = instant;
    }

    /// Replace the time of day, keeping the simulated date.
    ///
    /// Out-of-range values roll over through ordinary time arithmetic:
    /// `set_time_of_day(25, 0)` lands at 01:00 the next day.
    pub fn set_time_of_day(&mut self, hours: i64, minutes: i64) {
        let midnight = self
            .current
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        self.current = midnight + Duration::hours(hours) + Duration::minutes(minutes);
    }

    /// Advance by `dt_seconds` of wall time, scaled by the time speed.
    ///
    /// A no-op when paused. Called once per frame; calling it twice with the
    /// same delta advances twice.
    pub fn advance(&mut self, dt_seconds: f64) {
        if self.is_paused() {
            return;
        }
        let micros = (dt_seconds * 1_000_000.0 * self.time_speed).round() as i64;
        self.current += Duration::microseconds(micros);
    }
}
