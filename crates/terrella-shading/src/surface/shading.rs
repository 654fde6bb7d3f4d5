//! CPU reference for the per-pixel surface color.

use glam::Vec3;

use crate::blend::{mix, night_side_attenuation, ray_sphere_entry, smoothstep};
use crate::params::SharedShadingParams;

/// Everything one surface fragment sees. The planet is centered at the
/// world origin; `normal` is already front-face corrected and unit length.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceShadingInput {
    /// World-space position of the shaded point.
    pub world_position: Vec3,
    /// Outward unit surface normal.
    pub normal: Vec3,
    /// World-space camera position.
    pub camera_position: Vec3,
    /// Unit vector toward the sun.
    pub sun_direction: Vec3,
    /// Daylight color sample.
    pub day_sample: Vec3,
    /// City-lights / night color sample.
    pub night_sample: Vec3,
    /// Roughness channel of the combined map.
    pub roughness: f32,
    /// Cloud channel of the combined map.
    pub cloud: f32,
    /// Sample from the overlay imagery, when bound.
    pub overlay_sample: Option<Vec3>,
    /// Whether overlay imagery replaces the day texture.
    pub use_imagery: bool,
    /// Planet radius in meters.
    pub planet_radius: f32,
}

/// Day/night blend weight from the surface-sun alignment.
///
/// 0 at and below `sun_orientation = -0.25`, 1 at and above `0.5`,
/// monotone between, so the terminator is a wide soft band rather than a
/// hard line.
pub fn day_strength(sun_orientation: f32) -> f32 {
    smoothstep(-0.25, 0.5, sun_orientation)
}

/// Aerial-perspective haze for a given in-atmosphere path length.
///
/// Saturating exponential clamped to `[0, haze_max]`, then dimmed on the
/// night side with a floor so shadowed limbs keep a trace of atmosphere.
/// `haze_falloff_m` is validated positive at the configuration boundary.
pub fn haze_factor(path_length: f32, sun_orientation: f32, params: &SharedShadingParams) -> f32 {
    let optical = 1.0 - (-path_length / params.haze_falloff_m).exp();
    let haze = (params.haze_strength * optical).clamp(0.0, params.haze_max);
    haze * night_side_attenuation(sun_orientation)
}

/// Final opaque color for one surface point.
///
/// Pure, total, and branch-free in its blending: every input resolves to a
/// finite color, including polar night, camera-inside-atmosphere, and
/// missing overlay imagery (which falls back to the day sample).
pub fn shade_surface(input: &SurfaceShadingInput, params: &SharedShadingParams) -> Vec3 {
    let sun_dir = input.sun_direction.normalize();
    let normal = input.normal.normalize();

    // Clouds whiten whatever the ground shows, imagery or day texture.
    let ground = if input.use_imagery {
        input.overlay_sample.unwrap_or(input.day_sample)
    } else {
        input.day_sample
    };
    let cloud_strength = smoothstep(0.2, 1.0, input.cloud);
    let base = mix(ground, Vec3::ONE, (cloud_strength * 2.0).min(1.0));

    let sun_orientation = normal.dot(sun_dir);
    let day = day_strength(sun_orientation);
    let mut color = mix(input.night_sample, base, day);

    let view_dir = (input.camera_position - input.world_position).normalize();

    // Water glint: the roughness channel remaps into a gloss window and a
    // narrow Blinn-Phong lobe rides on top of the day side only.
    let roughness = smoothstep(params.roughness_low, params.roughness_high, input.roughness);
    let half = (sun_dir + view_dir).normalize();
    let glint = normal.dot(half).max(0.0).powf(32.0) * (1.0 - roughness) * day;
    color += Vec3::splat(glint * 0.35);

    let atmosphere_mix = smoothstep(-0.25, 0.75, sun_orientation);
    let atmosphere_color = mix(
        params.atmosphere_twilight_color,
        params.atmosphere_day_color,
        atmosphere_mix,
    );

    // Optical depth: the part of the camera ray inside the atmosphere sphere.
    let to_surface = input.world_position - input.camera_position;
    let distance = to_surface.length();
    let entry = ray_sphere_entry(
        input.camera_position,
        to_surface / distance,
        Vec3::ZERO,
        input.planet_radius * params.atmosphere_scale,
    );
    let path = (distance - entry).max(0.0);
    let haze = haze_factor(path, sun_orientation, params);
    color = mix(color, atmosphere_color, haze);

    // Grazing-angle brightening keeps the limb from reading flat.
    let horizon = 1.0 - normal.dot(view_dir).clamp(0.0, 1.0);
    color + atmosphere_color * (0.08 * horizon * horizon * haze)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SharedShadingParams {
        SharedShadingParams::default()
    }

    /// A surface point on a unit-scaled earth with the camera well outside
    /// the atmosphere, looking straight down at it.
    fn probe(normal: Vec3, sun: Vec3) -> SurfaceShadingInput {
        let radius = 6_371_000.0;
        SurfaceShadingInput {
            world_position: normal * radius,
            normal,
            camera_position: normal * radius * 3.0,
            sun_direction: sun,
            day_sample: Vec3::new(0.1, 0.3, 0.1),
            night_sample: Vec3::new(0.05, 0.05, 0.02),
            roughness: 1.0,
            cloud: 0.0,
            overlay_sample: None,
            use_imagery: false,
            planet_radius: radius,
        }
    }

    #[test]
    fn test_day_strength_endpoints_and_monotonicity() {
        assert_eq!(day_strength(-0.25), 0.0);
        assert_eq!(day_strength(-0.6), 0.0);
        assert_eq!(day_strength(0.5), 1.0);
        assert_eq!(day_strength(0.9), 1.0);
        let mut prev = 0.0_f32;
        for i in 0..=100 {
            let v = day_strength(-0.3 + i as f32 * 0.009);
            assert!(v >= prev, "day_strength must be non-decreasing");
            prev = v;
        }
    }

    #[test]
    fn test_subsolar_point_shows_day_texture() {
        let input = probe(Vec3::Y, Vec3::Y);
        let color = shade_surface(&input, &params());
        // Greener than the night sample: the day texture dominates.
        assert!(
            color.y > 0.2,
            "subsolar point should carry the day color, got {color:?}"
        );
    }

    #[test]
    fn test_antisolar_point_shows_night_texture() {
        let input = probe(Vec3::Y, Vec3::NEG_Y);
        let color = shade_surface(&input, &params());
        assert!(
            color.max_element() < 0.2,
            "antisolar point should be dark, got {color:?}"
        );
    }

    #[test]
    fn test_clouds_whiten_the_day_side() {
        let clear = probe(Vec3::Y, Vec3::Y);
        let overcast = SurfaceShadingInput { cloud: 1.0, ..clear };
        let clear_color = shade_surface(&clear, &params());
        let overcast_color = shade_surface(&overcast, &params());
        assert!(
            overcast_color.min_element() > clear_color.min_element(),
            "full cloud should pull the color toward white"
        );
    }

    #[test]
    fn test_overlay_replaces_day_only_when_flagged() {
        let base = probe(Vec3::Y, Vec3::Y);
        let with_overlay = SurfaceShadingInput {
            overlay_sample: Some(Vec3::new(0.8, 0.1, 0.1)),
            use_imagery: true,
            ..base
        };
        let ignored_overlay = SurfaceShadingInput {
            overlay_sample: Some(Vec3::new(0.8, 0.1, 0.1)),
            use_imagery: false,
            ..base
        };
        let with = shade_surface(&with_overlay, &params());
        let without = shade_surface(&ignored_overlay, &params());
        assert!(with.x > without.x, "flagged overlay should tint the output red");
        assert_eq!(
            without,
            shade_surface(&base, &params()),
            "an unused overlay must not leak into the result"
        );
    }

    #[test]
    fn test_haze_bounds_and_falloff_monotonicity() {
        let p = params();
        for path in [0.0, 1e4, 1e5, 1e6, 1e9] {
            let h = haze_factor(path, 1.0, &p);
            assert!(
                (0.0..=p.haze_max).contains(&h),
                "haze {h} out of [0, {}] at path {path}",
                p.haze_max
            );
        }
        let longer_falloff = SharedShadingParams {
            haze_falloff_m: p.haze_falloff_m * 2.0,
            ..p.clone()
        };
        let path = 150_000.0;
        assert!(
            haze_factor(path, 1.0, &longer_falloff) < haze_factor(path, 1.0, &p),
            "a longer falloff must strictly decrease haze for a fixed path"
        );
    }

    #[test]
    fn test_night_haze_keeps_a_floor() {
        let p = params();
        let lit = haze_factor(500_000.0, 1.0, &p);
        let dark = haze_factor(500_000.0, -1.0, &p);
        assert!(dark > 0.0, "haze must never fully vanish in shadow");
        assert!(
            (dark / lit - 0.25).abs() < 1e-3,
            "night floor should be a quarter of the lit value, got ratio {}",
            dark / lit
        );
    }

    #[test]
    fn test_camera_inside_atmosphere_sees_haze() {
        let radius = 6_371_000.0_f32;
        let mut input = probe(Vec3::Y, Vec3::Y);
        // Camera 10 km up, well inside the atmosphere shell.
        input.camera_position = Vec3::Y * (radius + 10_000.0);
        let color = shade_surface(&input, &params());
        assert!(color.is_finite(), "in-atmosphere camera must still resolve");
    }

    #[test]
    fn test_every_geometry_resolves_to_finite_color() {
        let p = params();
        let radius = 6_371_000.0;
        for &normal in &[Vec3::Y, Vec3::NEG_Y, Vec3::X, Vec3::new(0.6, 0.64, 0.48)] {
            for &sun in &[Vec3::Y, Vec3::NEG_Y, Vec3::Z] {
                let input = SurfaceShadingInput {
                    world_position: normal.normalize() * radius,
                    normal: normal.normalize(),
                    camera_position: Vec3::new(2.0, 1.0, 2.0).normalize() * radius * 5.0,
                    sun_direction: sun,
                    day_sample: Vec3::ONE,
                    night_sample: Vec3::ZERO,
                    roughness: 0.3,
                    cloud: 0.5,
                    overlay_sample: None,
                    use_imagery: true, // flagged but missing: falls back to day
                    planet_radius: radius,
                };
                let color = shade_surface(&input, &p);
                assert!(
                    color.is_finite() && color.min_element() >= 0.0,
                    "non-finite or negative color {color:?} for normal {normal:?} sun {sun:?}"
                );
            }
        }
    }
}
