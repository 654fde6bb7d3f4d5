//! Elevation-driven lighting curves: intensity, ambient, color, stars.
//!
//! All curves take the sine of the solar elevation (the vertical component
//! of the published sun direction for a viewer at the sub-camera point) and
//! return smoothly varying values, so per-frame lighting never pops.

use glam::Vec3;

/// Directional intensity from solar elevation, in [0, 1].
///
/// 1.0 once the sun is more than ~15° up, 0.0 below ~−10°, with a smooth
/// dawn/dusk ramp between.
pub fn sun_intensity_from_elevation(sin_elevation: f32) -> f32 {
    let low = (-10.0_f32).to_radians().sin();
    let high = (15.0_f32).to_radians().sin();
    smoothstep(low, high, sin_elevation)
}

/// Ambient fill from solar elevation: starlight floor at night, sky-scatter
/// level during the day.
pub fn ambient_from_elevation(sin_elevation: f32) -> f32 {
    let night = 0.05;
    let day = 0.15;
    lerp(night, day, sun_intensity_from_elevation(sin_elevation))
}

/// Sun color from elevation: warm orange at the horizon, near-white high up,
/// fading to black below the horizon. Linear RGB with intensity baked in.
pub fn sun_color_from_elevation(sin_elevation: f32) -> Vec3 {
    let warm = Vec3::new(1.0, 0.6, 0.3);
    let neutral = Vec3::new(1.0, 0.98, 0.92);
    let t = smoothstep(0.0, 0.5, sin_elevation);
    Vec3::lerp(warm, neutral, t) * sun_intensity_from_elevation(sin_elevation)
}

/// Star layer opacity: fully visible at night, gone during the day.
pub fn star_visibility(sin_elevation: f32) -> f32 {
    (1.0 - sun_intensity_from_elevation(sin_elevation) * 2.0).clamp(0.0, 1.0)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
