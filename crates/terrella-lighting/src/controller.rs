//! The lighting controller: single owner of clock, sun model, and sun state.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use glam::Vec3;
use tracing::{debug, trace};

use terrella_solar::{simplified_sun_direction, solar_position, sun_direction};

use crate::clock::SimulationClock;

/// Geographic observer position in degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]; the UI
/// layer validates before handing values in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverLocation {
    /// Degrees north of the equator.
    pub latitude_deg: f64,
    /// Degrees from the reference meridian.
    pub longitude_deg: f64,
}

/// The published lighting truth consumed by the shading stage.
///
/// `direction` is a unit vector from the planet center toward the sun,
/// recomputed whenever the clock or the sun model changes. The intensity
/// fields are plain scalars under caller control.
#[derive(Clone, Copy, Debug)]
pub struct SunState {
    /// Unit vector toward the sun, world space.
    pub direction: Vec3,
    /// Directional light intensity multiplier.
    pub intensity: f32,
    /// Ambient fill intensity.
    pub ambient_intensity: f32,
}

/// Snapshot of the simulated time for UI display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeInfo {
    /// Simulated calendar date (UTC).
    pub date: NaiveDate,
    /// Hour of day, 0–23.
    pub hours: u32,
    /// Minute of hour, 0–59.
    pub minutes: u32,
    /// Fraction of the day elapsed, in [0, 1).
    pub fractional_day: f64,
}

/// Owns the simulation clock and the active sun model, and publishes
/// [`SunState`] for the rest of the renderer.
///
/// Paused (time speed 0) and running are the only two states; the controller
/// lives for the whole lighting session. All setters recompute the sun
/// synchronously, so a caller never observes a stale direction after a
/// mutation returns.
#[derive(Clone, Debug)]
pub struct LightingController {
    clock: SimulationClock,
    location: Option<ObserverLocation>,
    simplified: bool,
    sun: SunState,
}

impl LightingController {
    /// Create a controller at the given simulated instant.
    ///
    /// Starts in the simplified (location-free) mode with real-time speed,
    /// unit intensity, and a modest ambient term.
    pub fn new(start: DateTime<Utc>) -> Self {
        let mut controller = Self {
            clock: SimulationClock::new(start),
            location: None,
            simplified: true,
            sun: SunState {
                direction: Vec3::Y,
                intensity: 1.0,
                ambient_intensity: 0.15,
            },
        };
        controller.recompute();
        controller
    }

    /// Advance simulated time by `dt_seconds` of wall time and recompute.
    ///
    /// No-op while paused. This is the once-per-frame entry point; there is
    /// no debouncing, so two calls with the same delta advance twice.
    pub fn update(&mut self, dt_seconds: f64) {
        if self.clock.is_paused() {
            return;
        }
        self.clock.advance(dt_seconds);
        self.recompute();
        trace!(instant = %self.clock.now(), "lighting updated");
    }

    /// Replace the simulated date-time and recompute immediately.
    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.clock.set_instant(date);
        self.recompute();
    }

    /// Replace the time of day (date preserved, out-of-range values roll
    /// over) and recompute immediately.
    pub fn set_time_of_day(&mut self, hours: i64, minutes: i64) {
        self.clock.set_time_of_day(hours, minutes);
        self.recompute();
    }

    /// Store an observer location and switch to the full astronomical model.
    pub fn set_location(&mut self, latitude_deg: f64, longitude_deg: f64) {
        self.location = Some(ObserverLocation {
            latitude_deg,
            longitude_deg,
        });
        self.simplified = false;
        self.recompute();
        debug!(latitude_deg, longitude_deg, "observer location set");
    }

    /// Switch between the simplified and the full model without touching the
    /// stored location. Switching back reproduces the full-model direction;
    /// the models keep no residual state.
    pub fn set_simplified_mode(&mut self, simplified: bool) {
        self.simplified = simplified;
        self.recompute();
    }

    /// Set the time-acceleration multiplier; 0 pauses.
    pub fn set_time_speed(&mut self, speed: f64) {
        self.clock.set_time_speed(speed);
    }

    /// Override the directional intensity. No recompute needed.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.sun.intensity = intensity;
    }

    /// Override the ambient intensity. No recompute needed.
    pub fn set_ambient_intensity(&mut self, ambient: f32) {
        self.sun.ambient_intensity = ambient;
    }

    /// The published sun state for this frame.
    pub fn sun(&self) -> &SunState {
        &self.sun
    }

    /// Unit vector toward the sun, for any lighting-dependent element.
    pub fn sun_direction(&self) -> Vec3 {
        self.sun.direction
    }

    /// Read access to the simulation clock.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Time snapshot for UI display.
    pub fn time_info(&self) -> TimeInfo {
        let now = self.clock.now();
        let seconds = now.num_seconds_from_midnight() as f64;
        TimeInfo {
            date: now.date_naive(),
            hours: now.hour(),
            minutes: now.minute(),
            fractional_day: seconds / 86_400.0,
        }
    }

    fn recompute(&mut self) {
        self.sun.direction = match (self.simplified, self.location) {
            (false, Some(location)) => {
                let pos = solar_position(
                    self.clock.now(),
                    location.latitude_deg,
                    location.longitude_deg,
                );
                sun_direction(pos.altitude, pos.azimuth)
            }
            _ => simplified_sun_direction(self.clock.now()),
        };
    }
}
