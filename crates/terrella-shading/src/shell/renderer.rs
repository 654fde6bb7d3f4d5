//! GPU-side atmosphere shell pass: shader, pipeline, and uniform upload.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::params::SharedShadingParams;
use crate::vertex::PlanetVertex;

/// WGSL source for the shell shader. Implements the same algorithm as
/// [`super::shade_shell`].
pub const SHELL_SHADER_SOURCE: &str = include_str!("shell.wgsl");

/// GPU-side shell uniform, 144 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ShellUniform {
    /// View-projection matrix (column-major). (offset 0)
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position. (offset 64)
    pub camera_position: [f32; 3],
    /// Planet surface radius in meters. (offset 76)
    pub planet_radius: f32,
    /// Unit direction toward the sun. (offset 80)
    pub sun_direction: [f32; 3],
    /// Shell scale over the planet radius. (offset 92)
    pub atmosphere_scale: f32,
    /// Lit-hemisphere atmosphere color. (offset 96)
    pub atmosphere_day_color: [f32; 3],
    /// Halo brightness. (offset 108)
    pub halo_strength: f32,
    /// Terminator atmosphere color. (offset 112)
    pub atmosphere_twilight_color: [f32; 3],
    /// Fresnel exponent. (offset 124)
    pub halo_power: f32,
    /// Camera-altitude fade length in meters. (offset 128)
    pub height_fade: f32,
    /// Padding to a 16-byte boundary. (offset 132)
    pub _padding: [f32; 3],
}

impl ShellUniform {
    /// Build the frame uniform from shared parameters and per-frame state.
    pub fn new(
        params: &SharedShadingParams,
        view_proj: Mat4,
        camera_position: Vec3,
        sun_direction: Vec3,
        planet_radius: f32,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            planet_radius,
            sun_direction: sun_direction.normalize().to_array(),
            atmosphere_scale: params.atmosphere_scale,
            atmosphere_day_color: params.atmosphere_day_color.to_array(),
            halo_strength: params.halo_strength,
            atmosphere_twilight_color: params.atmosphere_twilight_color.to_array(),
            halo_power: params.halo_power,
            height_fade: params.height_fade_m,
            _padding: [0.0; 3],
        }
    }
}

/// Translucent halo pass over back-side shell geometry.
pub struct ShellRenderer {
    /// The render pipeline for the shell pass.
    pub pipeline: wgpu::RenderPipeline,
    /// Bind group layout: the shell uniform alone.
    pub bind_group_layout: wgpu::BindGroupLayout,
    /// GPU uniform buffer.
    pub uniform_buffer: wgpu::Buffer,
}

impl ShellRenderer {
    /// Create the shell pipeline.
    ///
    /// Front faces are culled so only the inside of the enlarged sphere is
    /// shaded, and depth is read but never written so the halo composites
    /// over the surface without punching holes in it.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shell-shader"),
            source: wgpu::ShaderSource::Wgsl(SHELL_SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shell-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shell-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::GreaterEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shell-pipeline"),
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
                cull_mode: Some(wgpu::Face::Front),
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
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shell-uniform"),
            size: std::mem::size_of::<ShellUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
        }
    }

    /// Create the shell bind group.
    pub fn create_bind_group(&self, device: &wgpu::Device) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shell-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: self.uniform_buffer.as_entire_binding(),
            }],
        })
    }

    /// Upload the frame's uniform snapshot before the draw is issued.
    pub fn update_uniform(&self, queue: &wgpu::Queue, uniform: ShellUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draw the shell sphere.
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
