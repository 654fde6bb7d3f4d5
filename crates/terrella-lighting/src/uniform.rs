//! GPU-side sun uniform for external lighting-dependent passes.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::controller::SunState;

/// Published sun packed for a uniform buffer, 32 bytes, std140-compatible.
///
/// Any pass outside the surface/shell pair (moon, stars, lens effects) can
/// bind this instead of re-deriving a layout of its own.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SunUniform {
    /// xyz = unit direction toward the sun, w = intensity.
    pub direction_intensity: [f32; 4],
    /// xyz = light color (linear RGB), w = ambient intensity.
    pub color_ambient: [f32; 4],
}

impl SunUniform {
    /// Pack a [`SunState`] and light color for upload.
    pub fn from_state(sun: &SunState, color: Vec3) -> Self {
        Self {
            direction_intensity: [
                sun.direction.x,
                sun.direction.y,
                sun.direction.z,
                sun.intensity,
            ],
            color_ambient: [color.x, color.y, color.z, sun.ambient_intensity],
        }
    }
}
