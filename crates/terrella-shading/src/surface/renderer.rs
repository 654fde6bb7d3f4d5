//! GPU-side surface pass: shader, pipeline, and per-frame uniform upload.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::params::SharedShadingParams;
use crate::vertex::PlanetVertex;

/// WGSL source for the surface shader. Implements the same algorithm as
/// [`super::shade_surface`].
pub const SURFACE_SHADER_SOURCE: &str = include_str!("surface.wgsl");

/// Per-instance overlay state for one surface material.
///
/// Tiled surfaces share [`SharedShadingParams`] and the frame's sun
/// direction, but each tile owns its overlay slot: an explicit named field
/// and flag, with no interception of the ordinary day-texture binding.
/// When `texture` is `None` the day texture is bound in its place, so the
/// bind group layout never changes.
#[derive(Default)]
pub struct SurfaceOverlay {
    /// Overlay imagery for this tile, if any.
    pub texture: Option<wgpu::TextureView>,
    /// Whether the shader samples the overlay instead of the day texture.
    pub use_imagery: bool,
}

/// GPU-side surface uniform, 144 bytes, std140-compatible.
///
/// Scalars ride in the fourth component of each vec3 slot so no explicit
/// padding fields are needed.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SurfaceUniform {
    /// View-projection matrix (column-major). (offset 0)
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position. (offset 64)
    pub camera_position: [f32; 3],
    /// Planet radius in meters. (offset 76)
    pub planet_radius: f32,
    /// Unit direction toward the sun. (offset 80)
    pub sun_direction: [f32; 3],
    /// Atmosphere sphere scale over the planet radius. (offset 92)
    pub atmosphere_scale: f32,
    /// Lit-hemisphere atmosphere color. (offset 96)
    pub atmosphere_day_color: [f32; 3],
    /// Haze strength. (offset 108)
    pub haze_strength: f32,
    /// Terminator atmosphere color. (offset 112)
    pub atmosphere_twilight_color: [f32; 3],
    /// Haze e-folding length in meters. (offset 124)
    pub haze_falloff: f32,
    /// Haze clamp. (offset 128)
    pub haze_max: f32,
    /// Roughness remap window low edge. (offset 132)
    pub roughness_low: f32,
    /// Roughness remap window high edge. (offset 136)
    pub roughness_high: f32,
    /// 1.0 when the overlay replaces the day texture. (offset 140)
    pub use_imagery: f32,
}

impl SurfaceUniform {
    /// Build the frame uniform from shared parameters and per-frame state.
    pub fn new(
        params: &SharedShadingParams,
        view_proj: Mat4,
        camera_position: Vec3,
        sun_direction: Vec3,
        planet_radius: f32,
        use_imagery: bool,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            planet_radius,
            sun_direction: sun_direction.normalize().to_array(),
            atmosphere_scale: params.atmosphere_scale,
            atmosphere_day_color: params.atmosphere_day_color.to_array(),
            haze_strength: params.haze_strength,
            atmosphere_twilight_color: params.atmosphere_twilight_color.to_array(),
            haze_falloff: params.haze_falloff_m,
            haze_max: params.haze_max,
            roughness_low: params.roughness_low,
            roughness_high: params.roughness_high,
            use_imagery: if use_imagery { 1.0 } else { 0.0 },
        }
    }
}

/// Opaque planet-surface pass.
pub struct SurfaceRenderer {
    /// The render pipeline for the surface pass.
    pub pipeline: wgpu::RenderPipeline,
    /// Bind group layout: uniform, sampler, day/night/channels/overlay.
    pub bind_group_layout: wgpu::BindGroupLayout,
    /// GPU uniform buffer.
    pub uniform_buffer: wgpu::Buffer,
    /// Linear sampler shared by all four textures.
    pub sampler: wgpu::Sampler,
}

impl SurfaceRenderer {
    /// Create the surface pipeline.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("surface-shader"),
            source: wgpu::ShaderSource::Wgsl(SURFACE_SHADER_SOURCE.into()),
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("surface-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(2), // day
                texture_entry(3), // night
                texture_entry(4), // bump/roughness/cloud channels
                texture_entry(5), // overlay imagery
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("surface-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::GreaterEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("surface-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[PlanetVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("surface-uniform"),
            size: std::mem::size_of::<SurfaceUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface-sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
            sampler,
        }
    }

    /// Create a bind group for one tile's texture set.
    ///
    /// A tile without overlay imagery binds the day view into the overlay
    /// slot; the `use_imagery` uniform flag keeps the shader off it.
    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        day: &wgpu::TextureView,
        night: &wgpu::TextureView,
        channels: &wgpu::TextureView,
        overlay: &SurfaceOverlay,
    ) -> wgpu::BindGroup {
        let overlay_view = overlay.texture.as_ref().unwrap_or(day);
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("surface-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(day),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(night),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(channels),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::TextureView(overlay_view),
                },
            ],
        })
    }

    /// Upload the frame's uniform snapshot before the draw is issued.
    pub fn update_uniform(&self, queue: &wgpu::Queue, uniform: SurfaceUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draw one tile of indexed planet geometry.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        bind_group: &'a wgpu::BindGroup,
        vertex_buffer: &'a wgpu::Buffer,
        index_buffer: &'a wgpu::Buffer,
        index_count: u32,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_and_alignment() {
        assert_eq!(std::mem::size_of::<SurfaceUniform>(), 144);
        assert_eq!(std::mem::size_of::<SurfaceUniform>() % 16, 0);
        assert_eq!(std::mem::offset_of!(SurfaceUniform, camera_position), 64);
        assert_eq!(std::mem::offset_of!(SurfaceUniform, sun_direction), 80);
        assert_eq!(std::mem::offset_of!(SurfaceUniform, haze_max), 128);
        assert_eq!(std::mem::offset_of!(SurfaceUniform, use_imagery), 140);
    }

    #[test]
    fn test_uniform_normalizes_sun_and_flags_imagery() {
        let u = SurfaceUniform::new(
            &SharedShadingParams::default(),
            Mat4::IDENTITY,
            Vec3::ZERO,
            Vec3::new(0.0, 3.0, 0.0),
            6_371_000.0,
            true,
        );
        assert!((u.sun_direction[1] - 1.0).abs() < 1e-6);
        assert_eq!(u.use_imagery, 1.0);
    }
}
