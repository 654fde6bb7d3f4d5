//! Branch-free blending helpers shared by both shading models.

use glam::Vec3;

/// Cubic smoothstep between two edges, clamped to [0, 1].
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation between two scalars.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two colors.
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Night-side attenuation for atmosphere effects.
///
/// Keeps a 0.25 floor so haze and halo dim in shadow but never vanish.
pub fn night_side_attenuation(sun_orientation: f32) -> f32 {
    0.25 + 0.75 * smoothstep(-0.15, 0.25, sun_orientation)
}

/// Distance along a ray to its entry into a sphere.
///
/// Returns 0 when the origin is already inside the sphere and
/// `f32::INFINITY` when the ray misses it entirely or the sphere lies
/// behind the origin, so `max(0, segment_length - entry)` yields the
/// in-sphere portion of any segment without branching at the call site.
pub fn ray_sphere_entry(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> f32 {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return f32::INFINITY;
    }
    let sqrt_disc = disc.sqrt();
    if -b + sqrt_disc < 0.0 {
        return f32::INFINITY;
    }
    (-b - sqrt_disc).max(0.0)
}
