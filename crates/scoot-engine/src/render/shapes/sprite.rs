use std::collections::{HashMap, HashSet};

use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::texture::{ImageStore, TextureId};

use super::common::{
    self, InstanceBuffer, QuadBuffers, bind_quads, clamp_linear_sampler, create_screen_ubo,
    instanced_quad_pipeline, load_pass, sampler_layout_entry, screen_ubo_layout_entry,
    texture_layout_entry, write_screen_uniform,
};

/// Sprite (textured quad) renderer.
///
/// CPU images live in an [`ImageStore`]; the GPU copy is created here on the
/// first frame a texture is drawn, then cached for the renderer's lifetime.
/// Instances are batched per consecutive texture run in paint order, one
/// instanced draw call per run.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    screen_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    // Uploaded textures survive pipeline rebuilds; bind groups do not.
    gpu_textures: HashMap<TextureId, wgpu::TextureView>,
    bind_groups: HashMap<TextureId, wgpu::BindGroup>,
    warned_missing: HashSet<TextureId>,

    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders all `DrawCmd::Sprite` entries in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        images: &ImageStore,
    ) {
        self.ensure_pipeline(ctx);
        if self.sampler.is_none() {
            self.sampler = Some(clamp_linear_sampler(ctx.device, "scoot sprite sampler"));
        }
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "scoot sprite quad"));
        }
        if self.screen_ubo.is_none() {
            self.screen_ubo = Some(create_screen_ubo(ctx.device, "scoot sprite screen ubo"));
        }

        // Instance list paired with its texture, in paint order.
        let mut instances: Vec<(SpriteInstance, TextureId)> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Sprite(cmd) = &item.cmd else { continue };
            let r = cmd.rect.normalized();
            if r.is_empty() {
                continue;
            }
            instances.push((
                SpriteInstance {
                    dst_min: [r.origin.x, r.origin.y],
                    dst_max: [r.origin.x + r.size.x, r.origin.y + r.size.y],
                    uv_min: [0.0, 0.0],
                    uv_max: [1.0, 1.0],
                    tint: [cmd.tint.r, cmd.tint.g, cmd.tint.b, cmd.tint.a],
                },
                cmd.texture,
            ));
        }
        if instances.is_empty() {
            return;
        }

        // Upload any textures drawn for the first time and (re)build their
        // bind groups. Failures drop the affected instances below.
        for &(_, id) in &instances {
            self.ensure_texture(ctx, images, id);
        }
        instances.retain(|&(_, id)| self.bind_groups.contains_key(&id));
        if instances.is_empty() {
            return;
        }

        let Some(ubo) = self.screen_ubo.as_ref() else { return };
        write_screen_uniform(ctx.queue, ubo, ctx.viewport);

        let raw: Vec<SpriteInstance> = instances.iter().map(|&(inst, _)| inst).collect();
        self.instances
            .upload(ctx.device, ctx.queue, "scoot sprite instances", 16, &raw);

        let (Some(pipeline), Some(quad), Some(instance_vbo)) =
            (self.pipeline.as_ref(), self.quad.as_ref(), self.instances.get())
        else {
            return;
        };

        let mut rpass = load_pass(target.encoder, target.view, "scoot sprite pass");
        bind_quads(&mut rpass, pipeline, quad, instance_vbo);

        // One instanced call per consecutive same-texture run.
        let mut i = 0u32;
        while i < instances.len() as u32 {
            let id = instances[i as usize].1;
            let mut j = i + 1;
            while j < instances.len() as u32 && instances[j as usize].1 == id {
                j += 1;
            }
            if let Some(bind_group) = self.bind_groups.get(&id) {
                rpass.set_bind_group(0, bind_group, &[]);
                rpass.draw_indexed(0..6, 0, i..j);
            }
            i = j;
        }
    }

    // ── texture upload ─────────────────────────────────────────────────────

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>, images: &ImageStore, id: TextureId) {
        if self.bind_groups.contains_key(&id) {
            return;
        }

        if !self.gpu_textures.contains_key(&id) {
            let Some(img) = images.get(id) else {
                if self.warned_missing.insert(id) {
                    log::warn!("SpriteRenderer: unknown {id:?}, skipping");
                }
                return;
            };

            let extent = wgpu::Extent3d {
                width: img.width,
                height: img.height,
                depth_or_array_layers: 1,
            };
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("scoot sprite texture"),
                size: extent,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &img.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * img.width),
                    rows_per_image: Some(img.height),
                },
                extent,
            );

            let view = texture.create_view(&Default::default());
            self.gpu_textures.insert(id, view);
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(ubo) = self.screen_ubo.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };
        let Some(view) = self.gpu_textures.get(&id) else { return };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scoot sprite bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.bind_groups.insert(id, bind_group);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let module = common::shader(
            ctx.device,
            "scoot sprite shader",
            include_str!("shaders/sprite.wgsl"),
        );
        let bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scoot sprite bgl"),
                entries: &[
                    screen_ubo_layout_entry(0),
                    texture_layout_entry(1),
                    sampler_layout_entry(2),
                ],
            });

        self.pipeline = Some(instanced_quad_pipeline(
            ctx.device,
            "scoot sprite pipeline",
            &module,
            &bgl,
            SpriteInstance::layout(),
            ctx.surface_format,
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bgl);

        // Bind groups reference the old layout; rebuild them lazily.
        self.bind_groups.clear();
        self.screen_ubo = None;
    }
}

/// Destination corners, UV corners, and tint. 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    tint: [f32; 4],
}

common::instance_layout!(
    SpriteInstance: 1 => Float32x2, 2 => Float32x2, 3 => Float32x2, 4 => Float32x2, 5 => Float32x4
);
