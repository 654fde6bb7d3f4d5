//! Surface shading: day/night texture blend, clouds, and aerial haze.
//!
//! [`shade_surface`] is the CPU-side reference used by tests and probe
//! tooling; [`SURFACE_SHADER_SOURCE`] is the WGSL implementation of the same
//! algorithm, driven through [`SurfaceRenderer`].

mod renderer;
mod shading;

pub use renderer::{SURFACE_SHADER_SOURCE, SurfaceOverlay, SurfaceRenderer, SurfaceUniform};
pub use shading::{SurfaceShadingInput, day_strength, haze_factor, shade_surface};
