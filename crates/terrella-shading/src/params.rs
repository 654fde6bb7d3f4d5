//! Shared shading parameters and their boundary validation.

use glam::Vec3;

/// Planet-wide shading parameters shared by every surface tile and the
/// atmosphere shell.
///
/// One instance exists per planet, owned next to the lighting controller;
/// materials receive it by reference when their uniforms are built, never as
/// a private copy. Distances are meters; colors are linear RGB.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedShadingParams {
    /// Atmosphere color over the lit hemisphere.
    pub atmosphere_day_color: Vec3,
    /// Atmosphere color along the terminator.
    pub atmosphere_twilight_color: Vec3,
    /// Roughness-channel value mapped to a fully glossy response.
    pub roughness_low: f32,
    /// Roughness-channel value mapped to a fully rough response.
    pub roughness_high: f32,
    /// Atmosphere sphere radius as a multiple of the planet radius.
    /// Must match the scale of the rendered shell mesh.
    pub atmosphere_scale: f32,
    /// Overall haze amount.
    pub haze_strength: f32,
    /// E-folding length of the haze with in-atmosphere path length.
    pub haze_falloff_m: f32,
    /// Upper clamp on the haze blend factor.
    pub haze_max: f32,
    /// Overall halo brightness on the shell.
    pub halo_strength: f32,
    /// Fresnel exponent of the halo ring.
    pub halo_power: f32,
    /// E-folding altitude for the halo's camera-height fade.
    pub height_fade_m: f32,
}

impl Default for SharedShadingParams {
    fn default() -> Self {
        Self {
            atmosphere_day_color: Vec3::new(0.30, 0.57, 0.94),
            atmosphere_twilight_color: Vec3::new(0.96, 0.42, 0.16),
            roughness_low: 0.25,
            roughness_high: 0.35,
            atmosphere_scale: 1.04,
            haze_strength: 0.85,
            haze_falloff_m: 220_000.0,
            haze_max: 0.85,
            halo_strength: 0.9,
            halo_power: 2.5,
            height_fade_m: 600_000.0,
        }
    }
}

/// Rejections produced by [`SharedShadingParams::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ShadingParamsError {
    /// A falloff constant the shading formulas divide by is not positive.
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// The haze clamp is outside [0, 1].
    #[error("haze_max must be within [0, 1], got {0}")]
    HazeMaxOutOfRange(f32),

    /// The atmosphere sphere does not enclose the planet.
    #[error("atmosphere_scale must exceed 1.0, got {0}")]
    AtmosphereScaleTooSmall(f32),

    /// The roughness remap window is empty or inverted.
    #[error("roughness_low ({low}) must be below roughness_high ({high})")]
    RoughnessRangeInverted { low: f32, high: f32 },
}

impl SharedShadingParams {
    /// Validate the constants the hot path assumes.
    ///
    /// The shading formulas divide by the falloff lengths and the fresnel
    /// exponent feeds `powf`; they are checked here, at the configuration
    /// boundary, and never again per pixel.
    pub fn validate(&self) -> Result<(), ShadingParamsError> {
        for (name, value) in [
            ("haze_falloff_m", self.haze_falloff_m),
            ("height_fade_m", self.height_fade_m),
            ("halo_power", self.halo_power),
        ] {
            if !(value > 0.0) {
                return Err(ShadingParamsError::NonPositive { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.haze_max) {
            return Err(ShadingParamsError::HazeMaxOutOfRange(self.haze_max));
        }
        if self.atmosphere_scale <= 1.0 {
            return Err(ShadingParamsError::AtmosphereScaleTooSmall(
                self.atmosphere_scale,
            ));
        }
        if self.roughness_low >= self.roughness_high {
            return Err(ShadingParamsError::RoughnessRangeInverted {
                low: self.roughness_low,
                high: self.roughness_high,
            });
        }
        Ok(())
    }
}
