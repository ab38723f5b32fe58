//! Pieces shared by the shape renderers: the unit quad every instance is
//! stamped from, the screen-size uniform, the blend state, and the wgpu
//! plumbing each renderer would otherwise repeat.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;

/// Uniform carrying the logical screen size, used by the vertex stages to
/// map pixel coordinates to NDC. Padded to 16 bytes for uniform layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ScreenUniform {
    pub size_px: [f32; 2],
    pub _pad: [f32; 2],
}

/// Byte size of [`ScreenUniform`], for buffer creation and the bind group
/// layout's `min_binding_size` (via `wgpu::BufferSize::new`).
pub(super) const SCREEN_UBO_SIZE: wgpu::BufferAddress =
    std::mem::size_of::<ScreenUniform>() as wgpu::BufferAddress;

/// Corners of the unit quad, 0..1 in both axes. Instance attributes position
/// and scale it per shape.
pub(super) const UNIT_QUAD: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

pub(super) const UNIT_QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const CORNER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// Vertex buffer layout for the unit-quad corner stream (location 0).
fn corner_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &CORNER_ATTRS,
    }
}

/// Source-over blending for premultiplied-alpha colors.
fn blend_premultiplied() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── bind group layout entries ──────────────────────────────────────────────

pub(super) fn screen_ubo_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(SCREEN_UBO_SIZE),
        },
        count: None,
    }
}

pub(super) fn texture_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

pub(super) fn sampler_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

// ── per-renderer GPU resources ─────────────────────────────────────────────

pub(super) fn create_screen_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: SCREEN_UBO_SIZE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_screen_uniform(queue: &wgpu::Queue, ubo: &wgpu::Buffer, viewport: Viewport) {
    let u = ScreenUniform {
        size_px: [viewport.width.max(1.0), viewport.height.max(1.0)],
        _pad: [0.0; 2],
    };
    queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
}

/// Linear-filtered sampler clamping at texture edges.
pub(super) fn clamp_linear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

/// Static vertex/index buffers holding the unit quad.
pub(super) struct QuadBuffers {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl QuadBuffers {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&UNIT_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&UNIT_QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }
}

/// Screen-size uniform together with the bind group exposing it, for
/// renderers whose whole bind group is that one uniform.
pub(super) struct ScreenBinding {
    pub ubo: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl ScreenBinding {
    pub(super) fn new(device: &wgpu::Device, bgl: &wgpu::BindGroupLayout, label: &str) -> Self {
        let ubo = create_screen_ubo(device, label);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });
        Self { ubo, bind_group }
    }
}

/// Grow-only per-instance vertex buffer. Capacity rounds up to the next
/// power of two so steady frames reuse the same allocation.
#[derive(Default)]
pub(super) struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl InstanceBuffer {
    pub(super) fn upload<T: Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        min_capacity: usize,
        data: &[T],
    ) {
        if data.is_empty() {
            return;
        }
        if self.buffer.is_none() || data.len() > self.capacity {
            let cap = data.len().next_power_of_two().max(min_capacity);
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (cap * std::mem::size_of::<T>()) as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
        }
        if let Some(buffer) = self.buffer.as_ref() {
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
        }
    }

    pub(super) fn get(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

/// Declares the per-instance vertex layout for an instance struct: a static
/// attribute table plus a `layout()` accessor stepping per instance.
macro_rules! instance_layout {
    ($ty:ty : $($loc:tt => $fmt:tt),+ $(,)?) => {
        impl $ty {
            const ATTRS: &'static [wgpu::VertexAttribute] =
                &wgpu::vertex_attr_array![$($loc => $fmt),+];

            fn layout() -> wgpu::VertexBufferLayout<'static> {
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<$ty>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: Self::ATTRS,
                }
            }
        }
    };
}
pub(super) use instance_layout;

// ── passes and pipelines ───────────────────────────────────────────────────

pub(super) fn shader(device: &wgpu::Device, label: &str, wgsl: &'static str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(wgsl.into()),
    })
}

/// Binds the pipeline, quad geometry, and instance stream on `rpass`.
/// Callers follow with bind groups and `draw_indexed(0..6, 0, range)`.
pub(super) fn bind_quads(
    rpass: &mut wgpu::RenderPass<'_>,
    pipeline: &wgpu::RenderPipeline,
    quad: &QuadBuffers,
    instance_vbo: &wgpu::Buffer,
) {
    rpass.set_pipeline(pipeline);
    rpass.set_vertex_buffer(0, quad.vbo.slice(..));
    rpass.set_vertex_buffer(1, instance_vbo.slice(..));
    rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
}

/// Opens a render pass over `view` that preserves what previous passes drew.
pub(super) fn load_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    label: &str,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

/// Builds the standard shape pipeline: unit-quad corners at location 0,
/// per-instance attributes from `instance_layout`, `vs_main`/`fs_main` entry
/// points, premultiplied source-over blending.
pub(super) fn instanced_quad_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    bgl: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'_>,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bgl],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[corner_layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend_premultiplied()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
