//! CPU reference for the atmosphere halo color and opacity.

use glam::Vec3;

use crate::blend::{lerp, mix, night_side_attenuation, smoothstep};
use crate::params::SharedShadingParams;

/// Everything one shell fragment sees. The shell is a sphere of radius
/// `planet_radius * atmosphere_scale` centered at the world origin, rendered
/// from inside (back faces); `normal` is the outward radial direction.
#[derive(Clone, Copy, Debug)]
pub struct ShellShadingInput {
    /// World-space position on the shell.
    pub world_position: Vec3,
    /// Outward unit normal of the shell sphere.
    pub normal: Vec3,
    /// World-space camera position.
    pub camera_position: Vec3,
    /// Unit vector toward the sun.
    pub sun_direction: Vec3,
    /// Planet surface radius in meters.
    pub planet_radius: f32,
}

/// Halo color and opacity for one shell point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellSample {
    /// Atmosphere color, linear RGB.
    pub color: Vec3,
    /// Blend opacity in [0, 1].
    pub alpha: f32,
}

/// Shade one point of the atmosphere shell.
///
/// A fresnel ring peaks at the limb where the view grazes the shell, fades
/// with camera altitude so the halo thins out in deep space, and carries a
/// forward-scatter hotspot toward the sun. The alpha is a clamped convex
/// combination: never fully opaque, and never fully transparent on the lit
/// limb.
pub fn shade_shell(input: &ShellShadingInput, params: &SharedShadingParams) -> ShellSample {
    let sun_dir = input.sun_direction.normalize();
    let normal = input.normal.normalize();
    let view_dir = (input.camera_position - input.world_position).normalize();

    let ring = (1.0 - view_dir.dot(normal).abs()).powf(params.halo_power);

    // Halo density thins as the camera climbs away from the surface.
    let altitude = (input.camera_position.length() - input.planet_radius).max(0.0);
    let alt_factor = (-altitude / params.height_fade_m).exp();
    let density = lerp(0.18, 1.0, alt_factor);

    let sun_spot = (-view_dir).dot(sun_dir).max(0.0).powi(10);

    // Day/night factor from the radial direction, same floor as the haze.
    let sun_orientation = input.world_position.normalize().dot(sun_dir);
    let day_factor = night_side_attenuation(sun_orientation);

    let alpha = (params.halo_strength * density * ring + 0.35 * sun_spot * ring).clamp(0.0, 1.0)
        * day_factor;

    let atmosphere_mix = smoothstep(-0.25, 0.75, sun_orientation);
    let color = mix(
        params.atmosphere_twilight_color,
        params.atmosphere_day_color,
        atmosphere_mix,
    );

    ShellSample { color, alpha }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 6_371_000.0;

    fn params() -> SharedShadingParams {
        SharedShadingParams::default()
    }

    /// Camera on +Z looking at the planet; returns a shell point at the
    /// given fraction across the visible disc (0 = center, 1 = limb).
    fn limb_input(limb_fraction: f32, sun: Vec3) -> ShellShadingInput {
        let shell_radius = RADIUS * params().atmosphere_scale;
        let angle = limb_fraction * std::f32::consts::FRAC_PI_2;
        let normal = Vec3::new(angle.sin(), 0.0, angle.cos());
        ShellShadingInput {
            world_position: normal * shell_radius,
            normal,
            camera_position: Vec3::Z * RADIUS * 4.0,
            sun_direction: sun,
            planet_radius: RADIUS,
        }
    }

    #[test]
    fn test_limb_glows_brighter_than_disc_center() {
        let center = shade_shell(&limb_input(0.05, Vec3::Z), &params());
        let limb = shade_shell(&limb_input(0.95, Vec3::Z), &params());
        assert!(
            limb.alpha > center.alpha * 2.0,
            "fresnel ring should concentrate at the limb: {} vs {}",
            limb.alpha,
            center.alpha
        );
    }

    #[test]
    fn test_alpha_is_always_in_unit_range() {
        for frac in [0.0, 0.3, 0.6, 0.9, 1.0] {
            for sun in [Vec3::Z, Vec3::NEG_Z, Vec3::X, Vec3::Y] {
                let sample = shade_shell(&limb_input(frac, sun), &params());
                assert!(
                    (0.0..=1.0).contains(&sample.alpha),
                    "alpha {} out of range at frac {frac}",
                    sample.alpha
                );
                assert!(sample.color.is_finite());
            }
        }
    }

    #[test]
    fn test_lit_limb_is_never_fully_transparent() {
        let sample = shade_shell(&limb_input(0.95, Vec3::X), &params());
        assert!(
            sample.alpha > 0.05,
            "the lit limb must keep a visible halo, got {}",
            sample.alpha
        );
    }

    #[test]
    fn test_night_side_dims_but_keeps_the_halo() {
        let lit = shade_shell(&limb_input(0.95, Vec3::X), &params());
        let dark = shade_shell(&limb_input(0.95, Vec3::NEG_X), &params());
        assert!(dark.alpha < lit.alpha, "shadowed halo should be dimmer");
        assert!(dark.alpha > 0.0, "shadowed halo must not vanish");
    }

    #[test]
    fn test_halo_fades_with_camera_altitude() {
        // Same shell point and the same view ray; only the camera's distance
        // along that ray (and so its altitude) changes.
        let p = params();
        let world_position = Vec3::X * RADIUS * p.atmosphere_scale;
        let view = Vec3::new(0.3, 0.0, 1.0).normalize();
        let base = ShellShadingInput {
            world_position,
            normal: Vec3::X,
            camera_position: world_position + view * (RADIUS * 0.05),
            sun_direction: Vec3::X,
            planet_radius: RADIUS,
        };
        let raised = ShellShadingInput {
            camera_position: world_position + view * (RADIUS * 3.0),
            ..base
        };
        let near_sample = shade_shell(&base, &p);
        let far_sample = shade_shell(&raised, &p);
        assert!(
            far_sample.alpha < near_sample.alpha,
            "halo should thin with altitude: {} vs {}",
            far_sample.alpha,
            near_sample.alpha
        );
    }

    #[test]
    fn test_twilight_color_on_the_terminator() {
        // Terminator: radial direction orthogonal to the sun.
        let sample = shade_shell(&limb_input(1.0, Vec3::Y), &params());
        let p = params();
        assert!(
            sample.color.x > p.atmosphere_day_color.x,
            "terminator halo should lean toward the twilight color, got {:?}",
            sample.color
        );
    }
}
