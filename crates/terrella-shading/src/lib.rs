//! Per-pixel planet shading: day/night surface blending and atmosphere halo.
//!
//! Each shading model exists twice with identical semantics: a CPU-side pure
//! function used for validation and unit tests, and a WGSL shader that the
//! renderer runs per fragment. The CPU functions are the reference; the
//! shaders implement the same algorithm.
//!
//! Parameter ownership follows a strict split: one [`SharedShadingParams`]
//! per planet, mutated only by its owner and passed by reference into every
//! uniform build, and a [`SurfaceOverlay`] owned uniquely by each surface
//! material instance. Tiled surfaces therefore track one lighting truth
//! while overriding only their own overlay imagery.

mod blend;
mod params;
pub mod shell;
pub mod surface;
mod vertex;

pub use blend::{lerp, mix, night_side_attenuation, ray_sphere_entry, smoothstep};
pub use params::{ShadingParamsError, SharedShadingParams};
pub use shell::{ShellRenderer, ShellSample, ShellShadingInput, ShellUniform, shade_shell};
pub use surface::{
    SurfaceOverlay, SurfaceRenderer, SurfaceShadingInput, SurfaceUniform, day_strength,
    haze_factor, shade_surface,
};
pub use vertex::PlanetVertex;
