//! Simulated-time lighting: the clock, the controller, and the published sun.
//!
//! [`LightingController`] is the single owner of lighting state. Each frame
//! the host loop calls [`LightingController::update`] with the elapsed wall
//! time; the controller advances its [`SimulationClock`], recomputes the sun
//! direction through the active sun model, and publishes the result as a
//! [`SunState`] snapshot that the shading stage reads once per draw. Nothing
//! else in the system mutates lighting state.

mod clock;
mod controller;
mod curves;
mod uniform;

pub use clock::SimulationClock;
pub use controller::{LightingController, ObserverLocation, SunState, TimeInfo};
pub use curves::{
    ambient_from_elevation, star_visibility, sun_color_from_elevation, sun_intensity_from_elevation,
};
pub use uniform::SunUniform;
