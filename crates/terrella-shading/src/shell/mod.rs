//! Atmosphere shell shading: a translucent fresnel halo on back-side
//! geometry slightly larger than the planet.
//!
//! [`shade_shell`] is the CPU-side reference; [`SHELL_SHADER_SOURCE`] is the
//! WGSL twin, driven through [`ShellRenderer`].

mod renderer;
mod shading;

pub use renderer::{SHELL_SHADER_SOURCE, ShellRenderer, ShellUniform};
pub use shading::{ShellSample, ShellShadingInput, shade_shell};
